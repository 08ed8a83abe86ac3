pub mod layout;
pub mod media;
pub mod script;
pub mod sections;
pub mod site;
