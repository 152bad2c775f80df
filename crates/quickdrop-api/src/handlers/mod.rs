pub mod ask_ai;
pub mod download;
pub mod public_file;
pub mod upload;
