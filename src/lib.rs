pub mod qbank_txt;
pub mod question;
pub mod utility;
