use crate::config::MelodyConfig;
use crate::engines::generation::genome::Genome;
use crate::error::{MelogenError, Result};
use crate::music::melody::{genome_to_melody, Melody};
use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};
use std::path::Path;

/// Ticks per quarter note in MIDI output.
pub const TICKS_PER_QUARTER: u16 = 480;

const CHANNEL: u8 = 0;
const TRACK_NAME: &[u8] = b"Sample Track";

/// Decode `genome` and write it to `path`, creating parent directories.
pub fn save_genome_to_midi(path: &Path, genome: &Genome, config: &MelodyConfig) -> Result<()> {
    let melody = genome_to_melody(genome, config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_midi(path, &melody, config.bpm)
}

/// Convert a melody to MIDI and write it to a file.
pub fn write_midi(path: &Path, melody: &Melody, bpm: u32) -> Result<()> {
    let smf = melody_to_smf(melody, bpm)?;
    let mut buf = Vec::new();
    smf.write(&mut buf)
        .map_err(|e| MelogenError::Midi(e.to_string()))?;
    std::fs::write(path, &buf)?;
    Ok(())
}

/// Convert a melody to an in-memory Standard MIDI File (format 1): a tempo
/// track followed by a single melody track. Stacked voices share the melody
/// track and start together. Rests only advance time.
pub fn melody_to_smf(melody: &Melody, bpm: u32) -> Result<Smf<'static>> {
    if bpm == 0 {
        return Err(MelogenError::Midi("Tempo must be positive".to_string()));
    }
    if melody.notes.iter().any(|row| row.len() != melody.len()) || melody.velocity.len() != melody.len() {
        return Err(MelogenError::Midi(
            "Melody rows, velocities and beats differ in length".to_string(),
        ));
    }

    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    let tempo_microseconds = (60_000_000 / bpm).min(0x00FF_FFFF);
    let tempo_track: Track<'static> = vec![
        meta(0, MetaMessage::Tempo(u24::new(tempo_microseconds))),
        meta(0, MetaMessage::EndOfTrack),
    ];
    smf.tracks.push(tempo_track);

    let mut track: Track<'static> = vec![meta(0, MetaMessage::TrackName(TRACK_NAME))];
    let mut pending_delta: u32 = 0;

    for (i, velocity) in melody.velocity.iter().enumerate() {
        let duration = beats_to_ticks(melody.beat[i]);

        if *velocity == 0 {
            pending_delta += duration;
            continue;
        }

        for (voice, row) in melody.notes.iter().enumerate() {
            let delta = if voice == 0 { pending_delta } else { 0 };
            track.push(note(delta, MidiMessage::NoteOn {
                key: u7::new(row[i] & 0x7F),
                vel: u7::new(*velocity & 0x7F),
            }));
        }
        for (voice, row) in melody.notes.iter().enumerate() {
            let delta = if voice == 0 { duration } else { 0 };
            track.push(note(delta, MidiMessage::NoteOff {
                key: u7::new(row[i] & 0x7F),
                vel: u7::new(0),
            }));
        }
        pending_delta = if melody.notes.is_empty() { pending_delta + duration } else { 0 };
    }

    track.push(meta(pending_delta, MetaMessage::EndOfTrack));
    smf.tracks.push(track);

    Ok(smf)
}

fn beats_to_ticks(beats: f64) -> u32 {
    (beats * f64::from(TICKS_PER_QUARTER)).round().max(0.0) as u32
}

fn meta(delta: u32, message: MetaMessage<'static>) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::new(delta),
        kind: TrackEventKind::Meta(message),
    }
}

fn note(delta: u32, message: MidiMessage) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::new(delta),
        kind: TrackEventKind::Midi {
            channel: u4::new(CHANNEL),
            message,
        },
    }
}
