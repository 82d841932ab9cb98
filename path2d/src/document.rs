//! Pulls path data out of SVG documents.

use std::path::Path as FsPath;

use svg::node::element::tag::{self, Path};
use svg::parser::Event;

use crate::error::DocumentError;
use crate::path::Path2D;

fn collect_paths<'l, I>(events: I) -> Result<Vec<Path2D>, DocumentError>
where
    I: Iterator<Item = Event<'l>>,
{
    let mut paths = Vec::new();
    let mut index = 0;

    for event in events {
	match event {
	    Event::Tag(Path, kind, attributes) if kind != tag::Type::End => {
		match attributes.get("d") {
		    Some(data) => {
			let data: &str = data;
			let path = data
			    .parse::<Path2D>()
			    .map_err(|source| DocumentError::Path { index, source })?;
			tracing::debug!(index, segments = path.len(), "path element");
			paths.push(path);
		    },
		    None => tracing::warn!(index, "path element without data, skipped"),
		}
		index += 1;
	    },
	    Event::Error(err) => return Err(DocumentError::Svg(err.to_string())),
	    _ => (),
	}
    }

    Ok(paths)
}

/// One [`Path2D`] per `<path>` element carrying a `d` attribute, in
/// document order.
pub fn read_paths(content: &str) -> Result<Vec<Path2D>, DocumentError> {
    let parser = svg::read(content)?;
    collect_paths(parser)
}

pub fn open_paths<T: AsRef<FsPath>>(path: T) -> Result<Vec<Path2D>, DocumentError> {
    let mut content = String::new();
    let parser = svg::open(path.as_ref(), &mut content)?;
    let paths = collect_paths(parser)?;
    tracing::info!("loaded {} paths from {}", paths.len(), path.as_ref().display());
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedKind;

    const DOC: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <g transform="translate(10, 10)">
    <path id="first" d="M0 0 L10 0 L10 10 Z"/>
    <rect x="0" y="0" width="5" height="5"/>
    <path id="no-data"/>
  </g>
  <path d="m5 5 h10"></path>
</svg>"#;

    #[test]
    fn reads_paths_in_document_order() {
	let paths = read_paths(DOC).unwrap();
	assert_eq!(paths.len(), 2);
	assert_eq!(paths[0].len(), 4);
	assert_eq!(paths[1].to_path_data().unwrap(), "m5 5 h10");
    }

    #[test]
    fn reports_the_offending_element() {
	let doc = r#"<svg><path d="M0 0"/><path d="M0 0 Q1"/></svg>"#;
	match read_paths(doc) {
	    Err(DocumentError::Path { index, source }) => {
		assert_eq!(index, 1);
		assert_eq!(source.kind, MalformedKind::WrongArity { command: 'Q', expected: 4, found: 1 });
	    },
	    other => panic!("expected a path error, got {:?}", other),
	}
    }
}
