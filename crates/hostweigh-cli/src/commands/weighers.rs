use hostweigh_weights::{ALL_WEIGHERS, WeigherRegistry};

pub fn list() -> anyhow::Result<()> {
    print!("{}", format_weighers(&WeigherRegistry::builtin()));
    Ok(())
}

fn format_weighers(registry: &WeigherRegistry) -> String {
    let mut out = String::new();
    for class in registry.all_available() {
        out.push_str(&format!("{:<16} {}\n", class.name, class.aliases.join(", ")));
    }
    out.push_str(&format!("{:<16} (every weigher above)\n", ALL_WEIGHERS));
    out
}
