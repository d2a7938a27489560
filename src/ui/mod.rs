/// Presentation layer: egui panels rendering the report outputs.
pub mod charts;
pub mod pages;
pub mod panels;
pub mod table;
