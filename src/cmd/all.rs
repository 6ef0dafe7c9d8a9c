use vault_index::export;
use vault_index::OutputKind;

use super::open::Session;

pub fn run(session: &Session) -> anyhow::Result<()> {
    let extraction = session.extract()?;
    let mut written = Vec::new();

    let path = session.output_path(OutputKind::Metadata, None);
    export::write_json(&path, &extraction.records)?;
    written.push(("metadata", path));

    let path = session.output_path(OutputKind::Tags, None);
    export::write_json(&path, &extraction.tags)?;
    written.push(("tags", path));

    if let Some(inventory) = &extraction.inventory {
        let path = session.output_path(OutputKind::Inventory, None);
        export::write_json(&path, inventory)?;
        written.push(("inventory", path));
    }

    session.print_written(&written)
}
