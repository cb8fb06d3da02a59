use crate::config::{ConfigSection, FieldManifest};
use crate::error::Result;
use std::collections::HashSet;
use std::io::{BufRead, Write};

/// Line-oriented question/answer over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Ask a question and return the trimmed answer, or `None` at end of input.
    pub fn ask(&mut self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        if let Some(def) = default {
            write!(self.output, " [{}]", def)?;
        }
        write!(self.output, ": ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Show `message` and wait for Enter.
    pub fn pause(&mut self, message: &str) -> Result<()> {
        self.ask(message, None)?;
        Ok(())
    }

    /// Anything but `n`/`no` counts as yes; end of input counts as no.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        match self.ask(&format!("{} [Y/n]", prompt), None)? {
            Some(answer) => Ok(!matches!(answer.to_lowercase().as_str(), "n" | "no")),
            None => Ok(false),
        }
    }

    /// Ask for one configuration field until the answer parses.
    /// An empty answer or end of input keeps the default.
    pub fn field(&mut self, field: &FieldManifest) -> Result<serde_json::Value> {
        let default = match &field.default {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let prompt = if field.choices.is_empty() {
            field.description.clone()
        } else {
            format!("{} ({})", field.description, field.choices.join(", "))
        };

        loop {
            let answer = match self.ask(&prompt, Some(&default))? {
                Some(answer) if !answer.is_empty() => answer,
                _ => return Ok(field.default.clone()),
            };

            match field.parse_input(&answer) {
                Some(value) => return Ok(value),
                None => self.say(&format!("Invalid value {:?}", answer))?,
            }
        }
    }

    /// Prompt for every manifest field of `section` not listed in `skip`.
    pub fn section<S: ConfigSection>(&mut self, section: &S, skip: &HashSet<&str>) -> Result<S> {
        let mut current = section.clone();
        for field in section.to_manifest().fields {
            if skip.contains(field.name.as_str()) {
                continue;
            }
            let value = self.field(&field)?;
            current = current.with_field(&field.name, value)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EvolutionConfig, MelodyConfig};
    use crate::music::scale::{Key, Scale};
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_shows_default() {
        let mut p = prompter("hello\n");
        assert_eq!(p.ask("Name", Some("x")).unwrap(), Some("hello".to_string()));
        let (_, out) = p.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "Name [x]: ");
    }

    #[test]
    fn test_ask_end_of_input() {
        let mut p = prompter("");
        assert_eq!(p.ask("Name", None).unwrap(), None);
    }

    #[test]
    fn test_confirm() {
        let mut p = prompter("\ny\nn\nNO\nwhatever\n");
        assert!(p.confirm("continue?").unwrap());
        assert!(p.confirm("continue?").unwrap());
        assert!(!p.confirm("continue?").unwrap());
        assert!(!p.confirm("continue?").unwrap());
        assert!(p.confirm("continue?").unwrap());
        // input exhausted
        assert!(!p.confirm("continue?").unwrap());
    }

    #[test]
    fn test_field_reprompts_until_valid() {
        let field = FieldManifest::integer("num_bars", 8, 1, None, "Number of bars");
        let mut p = prompter("zero\n0\n6\n");

        assert_eq!(p.field(&field).unwrap(), serde_json::json!(6));

        let (_, out) = p.into_inner();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("Invalid value").count(), 2);
    }

    #[test]
    fn test_section_prompts_and_skips() {
        // num_bars, num_notes, num_steps, pauses, key, scale, root (root skipped)
        let mut p = prompter("4\n\n2\nno\nbb\nDorian\n");
        let skip: HashSet<&str> = ["root"].into_iter().collect();

        let config = p.section(&MelodyConfig::default(), &skip).unwrap();

        assert_eq!(config.num_bars, 4);
        assert_eq!(config.num_notes, 4);
        assert_eq!(config.num_steps, 2);
        assert!(!config.pauses);
        assert_eq!(config.key, Key::BFlat);
        assert_eq!(config.scale, Scale::Dorian);
        assert_eq!(config.root, 4);
    }

    #[test]
    fn test_section_end_of_input_keeps_defaults() {
        let mut p = prompter("");
        let config = p.section(&EvolutionConfig::default(), &HashSet::new()).unwrap();
        assert_eq!(config, EvolutionConfig::default());
    }
}
