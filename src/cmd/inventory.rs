use std::path::PathBuf;

use vault_index::export;
use vault_index::OutputKind;

use super::open::Session;

pub fn run(session: &Session, out: Option<PathBuf>) -> anyhow::Result<()> {
    let extraction = session.extract()?;
    let Some(inventory) = &extraction.inventory else {
        tracing::info!("vault has neither folders nor non-markdown files, nothing to write");
        return session.print_written(&[]);
    };

    let path = session.output_path(OutputKind::Inventory, out);
    export::write_json(&path, inventory)?;
    session.print_written(&[("inventory", path)])
}
