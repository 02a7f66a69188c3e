use std::fs;

use super::error::LoaderError;
use crate::graph::{Graph, GraphError, VertexSpec};

//─────────────────────────────────────────────────────────────────────────────

/// The eleven-vertex reference DAG rooted at `A`.
pub const REFERENCE_EDGES: &[(&str, &[&str])] = &[
    ("A", &["B", "C"]),
    ("B", &["D", "E", "F"]),
    ("C", &["D", "F"]),
    ("D", &["G", "H"]),
    ("E", &["H", "I"]),
    ("F", &["I"]),
    ("G", &["J", "K"]),
    ("H", &["K"]),
    ("I", &["K"]),
    ("J", &[]),
    ("K", &[]),
];

/// Builds the reference DAG with unit weights.
pub fn reference_graph() -> Result<Graph, GraphError> {
    Graph::build(
        REFERENCE_EDGES
            .iter()
            .map(|(name, children)| (*name, children.iter().copied())),
    )
}

/// Loads an edge-list file and builds the graph it declares.
pub fn load_graph_from_file(file_path: &str) -> Result<Graph, LoaderError> {
    let file_content =
        fs::read_to_string(file_path).map_err(|e| LoaderError::ReadFile(file_path.into(), e))?;

    let specs = parse_edge_list(&file_content)?;
    if specs.is_empty() {
        return Err(LoaderError::NoVertices(file_path.into()));
    }
    Ok(Graph::build_weighted(specs)?)
}

/// Parses one vertex declaration per line.
///
/// ```text
/// # comment
/// A -> B C
/// B(3) -> D, E
/// D
/// ```
pub fn parse_edge_list(text: &str) -> Result<Vec<VertexSpec>, LoaderError> {
    text.lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                None
            } else {
                Some(parse_line(index + 1, line))
            }
        })
        .collect()
}

fn parse_line(line_no: usize, line: &str) -> Result<VertexSpec, LoaderError> {
    let parse_err = |reason: String| LoaderError::Parse {
        line: line_no,
        reason,
    };

    let (head, tail) = match line.split_once("->") {
        Some((head, tail)) => (head.trim(), tail),
        None => (line, ""),
    };

    let (name, weight) = match head.split_once('(') {
        Some((name, rest)) => {
            let digits = rest
                .strip_suffix(')')
                .ok_or_else(|| parse_err(format!("unclosed weight in '{}'", head)))?;
            let weight = digits
                .trim()
                .parse::<u64>()
                .map_err(|e| parse_err(format!("bad weight '{}': {}", digits.trim(), e)))?;
            (name.trim(), weight)
        }
        None => (head, 1),
    };

    if !is_valid_name(name) {
        return Err(parse_err(format!("invalid vertex name '{}'", name)));
    }

    let children: Vec<String> = tail
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            if is_valid_name(token) {
                Ok(token.to_string())
            } else {
                Err(parse_err(format!("invalid child name '{}'", token)))
            }
        })
        .collect::<Result<_, _>>()?;

    Ok(VertexSpec {
        name: name.to_string(),
        weight,
        children,
    })
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | ',' | '>'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reference_graph_has_eleven_vertices() {
        let graph = reference_graph().expect("reference graph builds");
        assert_eq!(graph.len(), 11);
        assert_eq!(graph.edge_count(), 16);
    }

    #[test]
    fn parses_weights_children_and_comments() {
        let specs = parse_edge_list(
            "# header\n\nroot -> left, right\nleft(4) -> leaf # trailing\nright ->\nleaf\n",
        )
        .expect("parses");
        assert_eq!(
            specs,
            vec![
                VertexSpec::new("root", vec!["left", "right"]),
                VertexSpec::weighted("left", 4, vec!["leaf"]),
                VertexSpec::new("right", Vec::<String>::new()),
                VertexSpec::new("leaf", Vec::<String>::new()),
            ]
        );
    }

    #[test]
    fn bad_weight_reports_line_number() {
        let err = parse_edge_list("a -> b\nb(x)\n").unwrap_err();
        assert!(matches!(err, LoaderError::Parse { line: 2, .. }));
    }

    #[test]
    fn unclosed_weight_is_rejected() {
        let err = parse_edge_list("a(3 -> b\n").unwrap_err();
        assert!(matches!(err, LoaderError::Parse { line: 1, .. }));
    }

    #[test]
    fn missing_name_is_rejected() {
        let err = parse_edge_list("-> b\n").unwrap_err();
        assert!(matches!(err, LoaderError::Parse { line: 1, .. }));
    }

    #[test]
    fn loads_graph_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "A -> B C\nB -> C\nC").expect("write");
        let path = file.path().to_str().expect("utf-8 path").to_string();
        let graph = load_graph_from_file(&path).expect("loads");
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn unresolved_child_in_file_is_a_graph_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "A -> ghost").expect("write");
        let path = file.path().to_str().expect("utf-8 path").to_string();
        let err = load_graph_from_file(&path).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::Graph(GraphError::UnresolvedChild { .. })
        ));
    }

    #[test]
    fn empty_file_has_no_vertices() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let path = file.path().to_str().expect("utf-8 path").to_string();
        assert!(matches!(
            load_graph_from_file(&path),
            Err(LoaderError::NoVertices(_))
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        assert!(matches!(
            load_graph_from_file("/definitely/not/here.dag"),
            Err(LoaderError::ReadFile(..))
        ));
    }
}
