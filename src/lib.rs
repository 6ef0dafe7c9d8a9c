pub mod backlinks;
pub mod cli;
pub mod constants;
pub mod engine;
pub mod error;
pub mod export;
pub mod facts;
pub mod frontmatter;
pub mod inventory;
pub mod link_resolver;
pub mod path_index;
pub mod record;
pub mod resolve;
pub mod settings;
pub mod tags;
pub mod util;

pub use cli::{Cli, Command};
pub use engine::{extract, ExtractOptions, Extraction, RunContext, RunReport};
pub use error::{Error, Result};
pub use facts::{DocumentFacts, FactCache, RawReference, VaultEntry, VaultSnapshot};
pub use inventory::Inventory;
pub use link_resolver::{LinkResolver, LinkShape};
pub use path_index::{CollisionPolicy, NameCollision, PathIndex};
pub use record::{Backlink, DocumentRecord, NormalizedLink};
pub use resolve::{OutputKind, ResolveContext};
pub use settings::ExtractorSettings;
pub use tags::TagEntry;
