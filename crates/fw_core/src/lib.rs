//! fw_core: core types shared by the annotator, the renderer and the CLI.
//!
//! This crate is **I/O-free**. It defines the stable types used across the
//! workspace (`fw_io`, `fw_annotate`, `fw_report`, `fw_cli`).
//!
//! - Display IDs: `Uin`, `BodyCode`
//! - Question feed records: `QuestionRecord`, `QuestionType`, `QuestionBlock`
//! - Answering-body lookup: `AnsweringBodyMap` (ordered, overwrite-in-place)
//! - Business-item tree: `BusinessNode`, `ElementNode`
//! - Annotated inline content: `InlineNode`, `MarkerKind`
//! - Question counters: `Totals`
//! - Operator notification seam: `Notifier`, `RunContext`

#![forbid(unsafe_code)]

pub mod bodies;
pub mod business;
pub mod ids;
pub mod inline;
pub mod notify;
pub mod question;
pub mod totals;

pub use bodies::AnsweringBodyMap;
pub use business::{BusinessNode, ElementNode};
pub use ids::{BodyCode, Uin};
pub use inline::{InlineNode, MarkerKind};
pub use notify::{Notifier, RecordingNotifier, RunContext};
pub use question::{QuestionBlock, QuestionRecord, QuestionType};
pub use totals::Totals;
