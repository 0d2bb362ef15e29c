pub mod big_five;
pub mod executive_function;
pub mod gad7;
pub mod hexaco;
pub mod mdq;
pub mod neurodiversity;
pub mod phq15;
pub mod phq9;
