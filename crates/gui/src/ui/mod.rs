pub mod header;
pub mod landing;
pub mod status_panel;
