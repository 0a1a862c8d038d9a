pub mod colors;
pub mod export_worker;
pub mod qr_texture;
