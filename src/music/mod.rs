pub mod melody;
pub mod midi;
pub mod player;
pub mod scale;

pub use melody::{genome_to_melody, int_from_bits, Melody, BITS_PER_NOTE};
pub use midi::{melody_to_smf, save_genome_to_midi, write_midi};
pub use player::Player;
pub use scale::{pitch_name, EventScale, Key, Scale};
