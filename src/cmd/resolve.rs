//! Resolve a single link through the path index

use serde_json::json;
use vault_index::link_resolver::LinkTarget;
use vault_index::PathIndex;

use super::open::Session;

pub fn run(session: &Session, link: &str) -> anyhow::Result<()> {
    let snapshot = session.load_snapshot()?;
    let index = PathIndex::build_with_policy(
        snapshot.unique_documents().iter().map(|doc| doc.path.as_str()),
        session.options().collision_policy,
    )?;

    let target = LinkTarget::parse(link);
    let Some(path) = index.resolve(target.clean()) else {
        anyhow::bail!("'{}' does not resolve to any document", target.clean());
    };

    if session.json {
        let value = json!({
            "link": link,
            "relativePath": path,
            "anchor": target.anchor(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", path);
    }
    Ok(())
}
