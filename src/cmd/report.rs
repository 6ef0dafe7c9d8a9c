use vault_index::export;

use super::open::Session;

pub fn run(session: &Session) -> anyhow::Result<()> {
    let extraction = session.extract()?;
    let report = &extraction.report;

    if session.json {
        println!("{}", export::to_pretty_json(report)?);
        return Ok(());
    }

    println!("Documents:  {}", report.documents);
    println!("Links:      {} ({} unresolved)", report.links, report.unresolved);
    println!("Backlinks:  {}", report.backlinks);
    println!("Tags:       {}", report.tags);
    for collision in &extraction.collisions {
        println!("Shared name '{}': {}", collision.name, collision.paths.join(", "));
    }
    println!("Digest:     {}", report.digest);
    Ok(())
}
