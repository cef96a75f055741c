pub mod modal;
pub mod snackbar;
