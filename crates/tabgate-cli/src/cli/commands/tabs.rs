//! `tabgate tabs`: print the configured tab set.

use anyhow::Result;
use tabgate_core::config::Config;

pub fn list(config: &Config) -> Result<()> {
    let tabs = config.tab_set()?;
    let fallback = tabs.fallback().id.clone();
    for tab in tabs.iter() {
        let mut notes = Vec::new();
        if tab.requires_auth {
            notes.push("requires sign-in");
        }
        if tab.id == fallback {
            notes.push("fallback");
        }
        if notes.is_empty() {
            println!("{}\t{}", tab.id, tab.title);
        } else {
            println!("{}\t{}\t({})", tab.id, tab.title, notes.join(", "));
        }
    }
    Ok(())
}
