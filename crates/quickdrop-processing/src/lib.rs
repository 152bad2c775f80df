//! File processing: text extraction, file-type safety checks, QR rendering.

mod extract;
mod filetype;
mod qr;

pub use extract::extract_text;
pub use filetype::is_unsafe_file;
pub use qr::render_qr_png;
