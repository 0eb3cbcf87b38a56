pub mod category;
pub mod data;
pub mod expense;
pub mod filter;
pub mod report;
pub mod settings;
pub mod system;

use crate::cli::registry::{CommandEntry, CommandRegistry};

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(report::definitions());
    commands.extend(expense::definitions());
    commands.extend(filter::definitions());
    commands.extend(category::definitions());
    commands.extend(settings::definitions());
    commands.extend(data::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in all_definitions() {
        registry.register(entry);
    }
}
