/// HTML entity decoding for text received from the trivia service.
pub mod entities;
/// Non-mutating random permutations of answer choices.
pub mod shuffle;
