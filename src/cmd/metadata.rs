use std::path::PathBuf;

use vault_index::export;
use vault_index::OutputKind;

use super::open::Session;

pub fn run(session: &Session, out: Option<PathBuf>) -> anyhow::Result<()> {
    let extraction = session.extract()?;
    let path = session.output_path(OutputKind::Metadata, out);
    export::write_json(&path, &extraction.records)?;
    session.print_written(&[("metadata", path)])
}
