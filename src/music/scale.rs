use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Octaves covered by an EventScale.
pub const SCALE_OCTAVES: u8 = 2;

/// Highest valid starting octave; keeps every key's first pitch inside MIDI range.
pub const MAX_ROOT_OCTAVE: u8 = 8;

const PITCH_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    C,
    CSharp,
    DFlat,
    D,
    DSharp,
    EFlat,
    E,
    F,
    FSharp,
    GFlat,
    G,
    GSharp,
    AFlat,
    A,
    ASharp,
    BFlat,
    B,
}

impl Key {
    pub const ALL: [Key; 17] = [
        Key::C,
        Key::CSharp,
        Key::DFlat,
        Key::D,
        Key::DSharp,
        Key::EFlat,
        Key::E,
        Key::F,
        Key::FSharp,
        Key::GFlat,
        Key::G,
        Key::GSharp,
        Key::AFlat,
        Key::A,
        Key::ASharp,
        Key::BFlat,
        Key::B,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Key::C => "C",
            Key::CSharp => "C#",
            Key::DFlat => "Db",
            Key::D => "D",
            Key::DSharp => "D#",
            Key::EFlat => "Eb",
            Key::E => "E",
            Key::F => "F",
            Key::FSharp => "F#",
            Key::GFlat => "Gb",
            Key::G => "G",
            Key::GSharp => "G#",
            Key::AFlat => "Ab",
            Key::A => "A",
            Key::ASharp => "A#",
            Key::BFlat => "Bb",
            Key::B => "B",
        }
    }

    /// Pitch class, 0 = C. Enharmonic spellings share a pitch class.
    pub fn pitch_class(self) -> u8 {
        match self {
            Key::C => 0,
            Key::CSharp | Key::DFlat => 1,
            Key::D => 2,
            Key::DSharp | Key::EFlat => 3,
            Key::E => 4,
            Key::F => 5,
            Key::FSharp | Key::GFlat => 6,
            Key::G => 7,
            Key::GSharp | Key::AFlat => 8,
            Key::A => 9,
            Key::ASharp | Key::BFlat => 10,
            Key::B => 11,
        }
    }

    pub fn names() -> Vec<String> {
        Key::ALL.iter().map(|k| k.name().to_string()).collect()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Key::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown key {:?}, expected one of {}", wanted, Key::names().join(", ")))
    }
}

impl TryFrom<String> for Key {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.name().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Scale {
    Major,
    MelodicMinor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    MajorBlues,
    MinorBlues,
}

impl Scale {
    pub const ALL: [Scale; 8] = [
        Scale::Major,
        Scale::MelodicMinor,
        Scale::Dorian,
        Scale::Phrygian,
        Scale::Lydian,
        Scale::Mixolydian,
        Scale::MajorBlues,
        Scale::MinorBlues,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scale::Major => "major",
            Scale::MelodicMinor => "minorM",
            Scale::Dorian => "dorian",
            Scale::Phrygian => "phrygian",
            Scale::Lydian => "lydian",
            Scale::Mixolydian => "mixolydian",
            Scale::MajorBlues => "majorBlues",
            Scale::MinorBlues => "minorBlues",
        }
    }

    /// Semitone offsets of each degree above the key.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            Scale::Major => &[0, 2, 4, 5, 7, 9, 11],
            Scale::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
            Scale::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Scale::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            Scale::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Scale::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Scale::MajorBlues => &[0, 2, 3, 4, 7, 9],
            Scale::MinorBlues => &[0, 3, 5, 6, 7, 10],
        }
    }

    pub fn names() -> Vec<String> {
        Scale::ALL.iter().map(|s| s.name().to_string()).collect()
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Scale::ALL
            .iter()
            .copied()
            .find(|sc| sc.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown scale {:?}, expected one of {}", wanted, Scale::names().join(", ")))
    }
}

impl TryFrom<String> for Scale {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Scale> for String {
    fn from(scale: Scale) -> Self {
        scale.name().to_string()
    }
}

/// Concrete MIDI pitches of a scale in a key, starting at a given octave.
///
/// Decoded genomes yield scale degrees; this table turns them into pitches.
/// It spans [`SCALE_OCTAVES`] octaves so stacked voices have room above the
/// melody before wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventScale {
    pitches: Vec<u8>,
}

impl EventScale {
    /// MIDI convention: octave 4 starts at middle C (60).
    /// Pitches above 127 are dropped.
    pub fn new(key: Key, scale: Scale, root_octave: u8) -> Self {
        let base = 12 * (u16::from(root_octave) + 1) + u16::from(key.pitch_class());
        let pitches = (0..u16::from(SCALE_OCTAVES))
            .flat_map(|octave| {
                scale
                    .intervals()
                    .iter()
                    .map(move |interval| base + 12 * octave + u16::from(*interval))
            })
            .filter(|pitch| *pitch <= 127)
            .map(|pitch| pitch as u8)
            .collect();

        Self { pitches }
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// Pitch of scale entry `index`, wrapping around the scale.
    pub fn get(&self, index: usize) -> Option<u8> {
        if self.pitches.is_empty() {
            return None;
        }
        Some(self.pitches[index % self.pitches.len()])
    }

    pub fn pitches(&self) -> &[u8] {
        &self.pitches
    }
}

/// Scientific pitch name for a MIDI note, e.g. 60 -> "C4".
pub fn pitch_name(pitch: u8) -> String {
    let octave = i16::from(pitch / 12) - 1;
    format!("{}{}", PITCH_NAMES[usize::from(pitch % 12)], octave)
}
