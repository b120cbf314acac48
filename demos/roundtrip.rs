//! Reads a raw tree as JSON, parses it and prints it back.
//!
//! ```text
//! cargo run --example roundtrip -- tests/fixtures/nginx.json [indent]
//! ```
//!
//! With an `indent` argument the root is re-indented before dumping.

use anyhow::Context;
use bracetree::{parse_raw, RawNode};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let path = args.next().context("usage: roundtrip <raw.json> [indent]")?;
    let indent = args.next();

    let input = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let raw = RawNode::from_json(&input)?;

    let mut tree = parse_raw(&raw, None, false)?;
    let root = tree.root().context("empty tree")?;
    println!("{} node(s), indent {:?}", tree.len(), tree.get_indent(root)?);

    if let Some(indent) = indent {
        tree.set_indent(root, &indent)?;
    }

    let dumped = tree.dump(root, true)?;
    if dumped == raw {
        println!("round trip: identical");
    }
    println!("{}", dumped.to_json_pretty()?);
    println!("{}", dumped.flatten().concat());
    Ok(())
}
