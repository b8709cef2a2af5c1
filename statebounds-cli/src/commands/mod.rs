pub mod inspect;
pub mod names;
pub mod run;
pub mod verify;
