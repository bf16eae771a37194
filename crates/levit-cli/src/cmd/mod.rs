pub mod decision;
pub mod feature;
pub mod handoff;
pub mod init;
pub mod sync;
pub mod validate;
