use levenshtein::levenshtein;

/// Highest share of the query that may be edited for a field to match.
pub const THRESHOLD: f64 = 0.3;

/// Stand-in for a perfect score so that it still weighs in a product.
const EPSILON: f64 = 0.001;

/// Queries are cut to this many characters before matching.
pub const MAX_QUERY_CHARS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Position of the record in the order it was added.
    pub position: usize,

    /// Lower is better.
    pub score: f64,
}

#[derive(Debug, Default)]
pub struct Index {
    records: Vec<Vec<Field>>,
}

impl Index {
    pub fn new() -> Self {
        Index {
            records: Vec::new(),
        }
    }

    /// Index one record given the text of each of its searchable fields.
    /// Records are reported by the order they were added in.
    pub fn add_record(&mut self, fields: &[&str]) {
        let fields = fields
            .iter()
            .filter_map(|text| Field::new(text))
            .collect();
        self.records.push(fields);
    }

    /// Find every record with a field close enough to the query, best first.
    ///
    /// A field matches when some part of it is within `THRESHOLD` edits per
    /// query character of the query. Where in the field the match falls has
    /// no bearing on the score. Records with equal scores keep their order.
    /// Only the first `MAX_QUERY_CHARS` characters of the query are used.
    pub fn search(&self, query: &str) -> Vec<Hit> {
        let query: Vec<char> = query
            .trim()
            .to_lowercase()
            .chars()
            .take(MAX_QUERY_CHARS)
            .collect();
        if query.is_empty() {
            return Vec::new();
        }
        let max_edits = (query.len() as f64 * THRESHOLD).floor() as usize;

        let mut hits: Vec<_> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(position, fields)| {
                let mut score = None;
                for field in fields {
                    let Some(edits) = field.distance(&query, max_edits) else {
                        continue;
                    };
                    let ratio = (edits as f64 / query.len() as f64).max(EPSILON);
                    *score.get_or_insert(1.0) *= ratio.powf(field.norm);
                }
                score.map(|score| Hit { position, score })
            })
            .collect();

        hits.sort_by(|h1, h2| h1.score.total_cmp(&h2.score));
        hits
    }
}

#[derive(Debug)]
struct Field {
    chars: Vec<char>,

    /// Dampens matches in long fields.
    norm: f64,
}

impl Field {
    fn new(text: &str) -> Option<Self> {
        let text = text.trim().to_lowercase();
        let tokens = text.split_whitespace().count();
        if tokens == 0 {
            return None;
        }

        Some(Field {
            chars: text.chars().collect(),
            norm: 1.0 / (tokens as f64).sqrt(),
        })
    }

    /// The fewest edits that turn the query into some substring of the
    /// field, if that is at most `max_edits`.
    fn distance(&self, query: &[char], max_edits: usize) -> Option<usize> {
        let shortest = query.len().saturating_sub(max_edits).max(1);
        let longest = (query.len() + max_edits).min(self.chars.len());
        let query: String = query.iter().collect();

        let mut best = None;
        for width in shortest..=longest {
            for window in self.chars.windows(width) {
                let window: String = window.iter().collect();
                let edits = levenshtein(&query, &window);
                if edits <= max_edits && best.map_or(true, |b| edits < b) {
                    if edits == 0 {
                        return Some(0);
                    }
                    best = Some(edits);
                }
            }
        }

        // A field shorter than every window can still match as a whole.
        if best.is_none() && self.chars.len() < shortest {
            let whole: String = self.chars.iter().collect();
            let edits = levenshtein(&query, &whole);
            if edits <= max_edits {
                best = Some(edits);
            }
        }

        best
    }
}
