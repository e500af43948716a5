pub mod repairs;
pub mod whatsapp_templates;
