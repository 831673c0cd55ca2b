//! Line-level record types and parsers for the clustering tools' text formats

use crate::cluster::ClusterId;
use crate::error::RecordError;
use itertools::Itertools;

const HEADER_PREFIX: &str = "Cluster ID";

/// One edge assigned to a cluster by an edge-clustering tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRecord {
    pub cluster: i64,
    pub v1: u32,
    pub v2: u32,
}

/// One cluster with its vertex list, as a node-clustering tool reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipRecord {
    pub id: ClusterId,
    pub members: Vec<u32>,
}

/// Normalised edge-log entry `(v1, v2, cluster)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggedEdge {
    pub v1: u32,
    pub v2: u32,
    pub cluster: ClusterId,
}

impl LoggedEdge {
    pub fn to_line(&self) -> String {
        format!("{}\t{}\t{}", self.v1, self.v2, self.cluster)
    }
}

impl MembershipRecord {
    pub fn to_line(&self) -> String {
        format!("{}:{}\t{}", HEADER_PREFIX, self.id, self.members.iter().join(", "))
    }
}

fn parse_int<T: std::str::FromStr<Err = std::num::ParseIntError>>(
    token: &str,
) -> Result<T, RecordError> {
    token
        .trim()
        .parse()
        .map_err(|source| RecordError::InvalidInteger {
            token: token.to_string(),
            source,
        })
}

/// Keep only the ASCII digits of a cluster token, so "C12" reads as 12
pub fn extract_cluster_number(token: &str) -> Result<i64, RecordError> {
    let digits: String = token.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(RecordError::NoDigits {
            token: token.to_string(),
        });
    }
    parse_int(&digits)
}

/// Resolve a textual cluster id. A negative token names a synthetic
/// singleton when the only vertex it covers is the id's absolute value.
fn resolve_cluster_id(token: &str, numeric: i64, sole_vertex: Option<u32>) -> ClusterId {
    match sole_vertex {
        Some(vertex) if token.starts_with('-') && i64::from(vertex) == -numeric => {
            ClusterId::Singleton(vertex)
        }
        _ => ClusterId::Real(numeric),
    }
}

/// Parse `<cluster> <v1> <v2>`, split on spaces or tabs
pub fn parse_edge_record(line: &str) -> Result<EdgeRecord, RecordError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(RecordError::MissingField {
            expected: 3,
            found: fields.len(),
        });
    }

    Ok(EdgeRecord {
        cluster: extract_cluster_number(fields[0])?,
        v1: parse_int(fields[1])?,
        v2: parse_int(fields[2])?,
    })
}

/// Parse `Cluster ID:<id>\t<v1>, <v2>, ...`
///
/// A negative id whose only member is the id's absolute value is read as a
/// synthetic singleton; `-0` therefore names vertex 0's singleton.
pub fn parse_membership_record(line: &str) -> Result<MembershipRecord, RecordError> {
    let (header, vertices) = line.split_once('\t').ok_or(RecordError::MissingField {
        expected: 2,
        found: 1,
    })?;

    let id_token = header
        .split_once(':')
        .filter(|(prefix, _)| prefix.trim() == HEADER_PREFIX)
        .map(|(_, id)| id.trim())
        .ok_or_else(|| RecordError::MalformedHeader {
            header: header.to_string(),
        })?;
    let numeric: i64 = parse_int(id_token)?;

    let members = vertices
        .split(',')
        .map(parse_int::<u32>)
        .collect::<Result<Vec<u32>, _>>()?;

    let sole_vertex = match members.as_slice() {
        [only] => Some(*only),
        _ => None,
    };
    let id = resolve_cluster_id(id_token, numeric, sole_vertex);

    Ok(MembershipRecord { id, members })
}

/// Parse an edge-log line `v1\tv2\tcluster`
///
/// Ids resolve as in [`parse_membership_record`]: a self-loop on `v` tagged
/// `-v` belongs to `v`'s singleton.
pub fn parse_logged_edge(line: &str) -> Result<LoggedEdge, RecordError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 3 {
        return Err(RecordError::MissingField {
            expected: 3,
            found: fields.len(),
        });
    }

    let v1: u32 = parse_int(fields[0])?;
    let v2: u32 = parse_int(fields[1])?;
    let id_token = fields[2].trim();
    let numeric: i64 = parse_int(id_token)?;
    let sole_vertex = (v1 == v2).then_some(v1);

    Ok(LoggedEdge {
        v1,
        v2,
        cluster: resolve_cluster_id(id_token, numeric, sole_vertex),
    })
}

/// Parse a graph edge-file line `v1\tv2`
pub fn parse_graph_edge(line: &str) -> Result<(u32, u32), RecordError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 2 {
        return Err(RecordError::MissingField {
            expected: 2,
            found: fields.len(),
        });
    }
    Ok((parse_int(fields[0])?, parse_int(fields[1])?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_token_strips_non_digits() {
        assert_eq!(extract_cluster_number("C12").unwrap(), 12);
        assert_eq!(extract_cluster_number("G-3a").unwrap(), 3);
        assert!(matches!(
            extract_cluster_number("none"),
            Err(RecordError::NoDigits { .. })
        ));
    }

    #[test]
    fn edge_record_accepts_tabs_or_spaces() {
        let expected = EdgeRecord {
            cluster: 7,
            v1: 3,
            v2: 11,
        };
        assert_eq!(parse_edge_record("C7 3 11").unwrap(), expected);
        assert_eq!(parse_edge_record("C7\t3\t11").unwrap(), expected);
    }

    #[test]
    fn edge_record_needs_three_fields() {
        assert_eq!(
            parse_edge_record("C7 3"),
            Err(RecordError::MissingField {
                expected: 3,
                found: 2
            })
        );
        assert!(matches!(
            parse_edge_record("C7 x 3"),
            Err(RecordError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn membership_record_with_list() {
        let record = parse_membership_record("Cluster ID:4\t1, 5, 9").unwrap();
        assert_eq!(record.id, ClusterId::Real(4));
        assert_eq!(record.members, vec![1, 5, 9]);
    }

    #[test]
    fn membership_record_without_comma_has_one_member() {
        let record = parse_membership_record("Cluster ID:2\t8").unwrap();
        assert_eq!(record.members, vec![8]);
    }

    #[test]
    fn negative_single_member_is_singleton() {
        let record = parse_membership_record("Cluster ID:-4\t4").unwrap();
        assert_eq!(record.id, ClusterId::Singleton(4));

        let zero = parse_membership_record("Cluster ID:-0\t0").unwrap();
        assert_eq!(zero.id, ClusterId::Singleton(0));

        // A plain 0 stays a real cluster.
        let real = parse_membership_record("Cluster ID:0\t0").unwrap();
        assert_eq!(real.id, ClusterId::Real(0));
    }

    #[test]
    fn membership_header_must_name_cluster_id() {
        assert!(matches!(
            parse_membership_record("Group:4\t1"),
            Err(RecordError::MalformedHeader { .. })
        ));
        assert!(matches!(
            parse_membership_record("Cluster ID:4 1, 2"),
            Err(RecordError::MissingField { .. })
        ));
    }

    #[test]
    fn lines_render_in_listing_format() {
        let record = MembershipRecord {
            id: ClusterId::Singleton(0),
            members: vec![0],
        };
        assert_eq!(record.to_line(), "Cluster ID:-0\t0");

        let edge = LoggedEdge {
            v1: 1,
            v2: 2,
            cluster: ClusterId::Real(5),
        };
        assert_eq!(edge.to_line(), "1\t2\t5");
        assert_eq!(parse_logged_edge(&edge.to_line()).unwrap(), edge);
    }

    #[test]
    fn edge_log_ids_resolve_like_listing_ids() {
        let self_loop = parse_logged_edge("4\t4\t-4").unwrap();
        assert_eq!(self_loop.cluster, ClusterId::Singleton(4));
        assert_eq!(
            parse_logged_edge(&self_loop.to_line()).unwrap(),
            self_loop
        );

        assert_eq!(
            parse_logged_edge("0\t0\t-0").unwrap().cluster,
            ClusterId::Singleton(0)
        );
        assert_eq!(
            parse_logged_edge("4\t5\t-4").unwrap().cluster,
            ClusterId::Real(-4)
        );
        assert_eq!(
            parse_logged_edge("4\t4\t4").unwrap().cluster,
            ClusterId::Real(4)
        );
    }

    #[test]
    fn graph_edge_is_tab_delimited() {
        assert_eq!(parse_graph_edge("3\t4").unwrap(), (3, 4));
        assert!(parse_graph_edge("3 4").is_err());
    }
}
