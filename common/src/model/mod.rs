pub mod obligations;
pub mod options;
pub mod signature;
pub mod survey;
pub mod tariff;
