//! End-to-end runs over a fixture snapshot

use std::fs;

use serde_json::{json, Value};
use tempfile::TempDir;
use vault_index::export;
use vault_index::{extract, ExtractOptions, Extraction, ExtractorSettings, OutputKind, ResolveContext, VaultSnapshot};

fn fixture() -> Value {
    json!({
        "documents": [
            {
                "path": "folder/Note A.md",
                "cache": {
                    "tags": ["#Foo", "#foo", "#FOO", "#project/alpha"],
                    "links": [
                        {"link": "B", "position": {"line": 3, "col": 0, "offset": 40}},
                        {"link": "Ghost", "position": {"line": 5, "col": 2, "offset": 80}}
                    ],
                    "embeds": [
                        {"link": "attachments/diagram.png", "position": {"line": 4, "col": 0, "offset": 60}},
                        {"link": "B#Summary", "position": {"line": 6, "col": 0, "offset": 100}}
                    ],
                    "headings": [{"heading": "Heading", "level": 1}],
                    "frontmatter": {"aliases": ["First Note", ""]}
                }
            },
            {
                "path": "B.md",
                "cache": {
                    "tags": ["#foo"],
                    "links": [
                        {"link": "Note A"},
                        {"link": "Note A#Heading", "displayText": "custom text"},
                        {"link": "#Heading"}
                    ]
                }
            },
            {
                "path": "Empty.md",
                "cache": {}
            }
        ],
        "tagCounts": {"#Foo": 1, "#foo": 2, "#FOO": 1, "#project/alpha": 1},
        "entries": [
            {"type": "folder", "path": "folder"},
            {"type": "folder", "path": "attachments"},
            {"type": "file", "path": "folder/Note A.md"},
            {"type": "file", "path": "attachments/diagram.png"}
        ]
    })
}

fn snapshot() -> VaultSnapshot {
    serde_json::from_value(fixture()).unwrap()
}

fn run() -> Extraction {
    extract(&snapshot(), &ExtractOptions::default()).unwrap()
}

fn record_json(extraction: &Extraction, path: &str) -> Value {
    let record = extraction
        .records
        .iter()
        .find(|r| r.relative_path == path)
        .unwrap();
    serde_json::to_value(record).unwrap()
}

#[test]
fn test_runs_are_byte_identical() {
    let first = run();
    let second = run();

    assert_eq!(
        export::to_pretty_json(&first.records).unwrap(),
        export::to_pretty_json(&second.records).unwrap()
    );
    assert_eq!(
        export::to_pretty_json(&first.tags).unwrap(),
        export::to_pretty_json(&second.tags).unwrap()
    );
    assert_eq!(first.report.digest, second.report.digest);
}

#[test]
fn test_repeated_tag_counts_document_once() {
    let extraction = run();
    let note = record_json(&extraction, "folder/Note A.md");
    assert_eq!(note["tags"], json!(["foo", "project/alpha"]));

    let foo = extraction.tags.iter().find(|t| t.tag == "foo").unwrap();
    assert_eq!(foo.relative_paths, vec!["folder/Note A.md", "B.md"]);
    assert_eq!(foo.tag_count, 4);
}

#[test]
fn test_link_shapes() {
    let extraction = run();
    let b = record_json(&extraction, "B.md");

    assert_eq!(
        b["links"],
        json!([
            {"link": "Note A", "relativePath": "folder/Note A.md"},
            {
                "link": "Note A#Heading",
                "relativePath": "folder/Note A.md",
                "cleanLink": "Note A",
                "displayText": "custom text"
            },
            {"link": "#Heading", "relativePath": "B.md"}
        ])
    );

    let note = record_json(&extraction, "folder/Note A.md");
    assert_eq!(note["links"][1], json!({"link": "Ghost"}));
}

#[test]
fn test_backlinks_are_reciprocal() {
    let extraction = run();

    for source in &extraction.records {
        for link in &source.links {
            let Some(target_path) = link.resolved_path.as_deref() else {
                continue;
            };
            if target_path == source.relative_path {
                continue;
            }
            let target = extraction
                .records
                .iter()
                .find(|r| r.relative_path == target_path)
                .unwrap();
            let matching = target
                .backlinks
                .iter()
                .filter(|b| b.relative_path == source.relative_path && b.link == link.link)
                .count();
            assert_eq!(matching, 1, "{} -> {}", source.relative_path, link.link);
        }
    }

    // The same-document anchor on B adds nothing to B itself
    let b = extraction.records.iter().find(|r| r.relative_path == "B.md").unwrap();
    assert!(b.backlinks.iter().all(|entry| entry.relative_path != "B.md"));
    assert_eq!(b.backlinks.len(), 2);

    let empty = extraction.records.iter().find(|r| r.relative_path == "Empty.md").unwrap();
    assert!(empty.backlinks.is_empty());
}

#[test]
fn test_empty_document_has_identity_only() {
    let extraction = run();
    assert_eq!(
        record_json(&extraction, "Empty.md"),
        json!({"fileName": "Empty", "relativePath": "Empty.md"})
    );
}

#[test]
fn test_attachment_embeds_are_dropped() {
    let extraction = run();
    let note = record_json(&extraction, "folder/Note A.md");
    let links = note["links"].as_array().unwrap();

    assert_eq!(links.len(), 3);
    assert!(links.iter().all(|l| l["link"] != "diagram.png"));
    // Ordered by position: B, Ghost, then the B#Summary embed
    assert_eq!(links[0]["link"], "B");
    assert_eq!(
        links[2],
        json!({"link": "B#Summary", "relativePath": "B.md", "cleanLink": "B"})
    );
    assert_eq!(links[1]["link"], "Ghost");
}

#[test]
fn test_aliases_and_headings_from_facts() {
    let extraction = run();
    let note = record_json(&extraction, "folder/Note A.md");
    assert_eq!(note["aliases"], json!(["First Note"]));
    assert_eq!(note["headings"], json!([{"heading": "Heading", "level": 1}]));
}

#[test]
fn test_malformed_document_does_not_abort_run() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot_path = temp_dir.path().join("snapshot.json");
    let mut value = fixture();
    value["documents"][1]["cache"]["tags"] = json!(5);
    fs::write(&snapshot_path, serde_json::to_string(&value).unwrap()).unwrap();

    let snapshot = VaultSnapshot::load(&snapshot_path).unwrap();
    let extraction = extract(&snapshot, &ExtractOptions::default()).unwrap();

    assert_eq!(extraction.records.len(), 3);
    assert_eq!(
        record_json(&extraction, "B.md"),
        json!({
            "fileName": "B",
            "relativePath": "B.md",
            "backlinks": [
                {"fileName": "Note A", "link": "B", "relativePath": "folder/Note A.md"},
                {"fileName": "Note A", "link": "B#Summary", "relativePath": "folder/Note A.md", "cleanLink": "B"}
            ]
        })
    );
    let note = record_json(&extraction, "folder/Note A.md");
    assert_eq!(note["tags"], json!(["foo", "project/alpha"]));
}

#[test]
fn test_write_outputs_to_plugin_folder() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot_path = temp_dir.path().join("snapshot.json");
    fs::write(&snapshot_path, serde_json::to_string(&fixture()).unwrap()).unwrap();

    let ctx = ResolveContext::with_vault(
        temp_dir.path().to_path_buf(),
        ".obsidian".to_string(),
        ExtractorSettings::default(),
    )
    .unwrap();
    let snapshot = VaultSnapshot::load(&snapshot_path).unwrap();
    let extraction = extract(&snapshot, &ExtractOptions::default()).unwrap();

    let metadata_path = ctx.output_path(OutputKind::Metadata);
    export::write_json(&metadata_path, &extraction.records).unwrap();
    let inventory_path = ctx.output_path(OutputKind::Inventory);
    export::write_json(&inventory_path, &extraction.inventory).unwrap();

    assert!(metadata_path.ends_with(".obsidian/plugins/metadata-extractor/metadata.json"));
    let written: Value = serde_json::from_str(&fs::read_to_string(&metadata_path).unwrap()).unwrap();
    assert_eq!(written.as_array().unwrap().len(), 3);

    let inventory: Value = serde_json::from_str(&fs::read_to_string(&inventory_path).unwrap()).unwrap();
    assert_eq!(
        inventory["nonMdFiles"],
        json!([{"name": "diagram.png", "basename": "diagram", "relativePath": "attachments/diagram.png"}])
    );
}
