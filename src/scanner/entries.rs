use super::{MarcaEntry, MarkKind};
use regex::Regex;
use std::sync::OnceLock;

// Patterns for the INID-coded lines of a bulletin entry
const ACTA_PATTERN: &str = r"\(21\) Acta (\d+) - \(51\) Clase (\d+)";
const MARK_LINE_PATTERN: &str = r"\(40\) [DM] \(54\)";
const MARK_NAME_PATTERN: &str = r"\(40\) ([DM]) \(54\) (.+)";
const BARE_MIXED_PATTERN: &str = r"\(40\) M \(54\)";
const APPLICANT_PATTERN: &str = r"\(73\) (.+)";

/// Name given to mixed marks published without a word element.
pub const UNNAMED_MIXED_MARK: &str = "MARCA MIXTA";

static ACTA_REGEX: OnceLock<Regex> = OnceLock::new();
static MARK_LINE_REGEX: OnceLock<Regex> = OnceLock::new();
static MARK_NAME_REGEX: OnceLock<Regex> = OnceLock::new();
static BARE_MIXED_REGEX: OnceLock<Regex> = OnceLock::new();
static APPLICANT_REGEX: OnceLock<Regex> = OnceLock::new();

fn cached(cell: &'static OnceLock<Regex>, pattern: &'static str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("entry patterns are valid regexes"))
}

/// Entry being assembled while walking the bulletin lines.
#[derive(Debug, Default)]
struct PendingEntry {
    numero: Option<String>,
    clase: Option<String>,
    kind: Option<MarkKind>,
    marca: Option<String>,
    solicitante: Option<String>,
}

impl PendingEntry {
    fn into_entry(self) -> Option<MarcaEntry> {
        let marca = self.marca?;
        Some(MarcaEntry {
            kind: self.kind.unwrap_or(MarkKind::Denominative),
            marca,
            clase: self.clase,
            solicitante: self.solicitante,
            numero: self.numero,
        })
    }
}

/// Extracts the published trademark applications from bulletin text.
///
/// An entry starts at a `(21) Acta <n> - (51) Clase <c>` line, gets its type and
/// name from `(40) <D|M> (54) <name>` and its applicant from the first `(73)`
/// line after the name. Entries that never received a name are dropped.
pub fn extract_marca_entries(text: &str) -> Vec<MarcaEntry> {
    let acta = cached(&ACTA_REGEX, ACTA_PATTERN);
    let mark_line = cached(&MARK_LINE_REGEX, MARK_LINE_PATTERN);
    let mark_name = cached(&MARK_NAME_REGEX, MARK_NAME_PATTERN);
    let bare_mixed = cached(&BARE_MIXED_REGEX, BARE_MIXED_PATTERN);
    let applicant = cached(&APPLICANT_REGEX, APPLICANT_PATTERN);

    let mut entries = Vec::new();
    let mut current = PendingEntry::default();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(caps) = acta.captures(line) {
            let finished = std::mem::take(&mut current);
            entries.extend(finished.into_entry());
            current = PendingEntry {
                numero: Some(caps[1].to_string()),
                clase: Some(caps[2].to_string()),
                kind: Some(MarkKind::Denominative),
                ..PendingEntry::default()
            };
        }

        if current.numero.is_some() && mark_line.is_match(line) {
            if let Some(caps) = mark_name.captures(line) {
                current.kind = Some(MarkKind::from_code(&caps[1]));
                current.marca = Some(caps[2].trim().to_string());
            } else if bare_mixed.is_match(line) {
                current.kind = Some(MarkKind::Mixed);
                current.marca = Some(UNNAMED_MIXED_MARK.to_string());
            }
        }

        if current.marca.is_some() && current.solicitante.is_none() {
            if let Some(caps) = applicant.captures(line) {
                current.solicitante = Some(caps[1].trim().to_string());
            }
        }
    }

    entries.extend(current.into_entry());
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        BOLETIN DE MARCAS N° 5210
        (21) Acta 4510769 - (51) Clase 21
        (40) D (54) THERMACELL
        (73) THERMACELL REPELLENTS, INC.
        (73) OTRO SOLICITANTE
        (21) Acta 4510770 - (51) Clase 35
        (40) M (54)
        (73) ACME S.A.
        (21) Acta 4510771 - (51) Clase 9
        (73) SIN NOMBRE S.R.L.
        (21) Acta 4510772 - (51) Clase 25
        (40) M (54) SOLARIS
    "#;

    #[test]
    fn test_extracts_denominative_entry_with_first_applicant() {
        let entries = extract_marca_entries(SAMPLE);
        let first = &entries[0];
        assert_eq!(first.kind, MarkKind::Denominative);
        assert_eq!(first.marca, "THERMACELL");
        assert_eq!(first.numero.as_deref(), Some("4510769"));
        assert_eq!(first.clase.as_deref(), Some("21"));
        assert_eq!(first.solicitante.as_deref(), Some("THERMACELL REPELLENTS, INC."));
    }

    #[test]
    fn test_bare_mixed_mark_gets_placeholder_name() {
        let entries = extract_marca_entries(SAMPLE);
        assert_eq!(entries[1].kind, MarkKind::Mixed);
        assert_eq!(entries[1].marca, UNNAMED_MIXED_MARK);
        assert_eq!(entries[1].solicitante.as_deref(), Some("ACME S.A."));
    }

    #[test]
    fn test_entries_without_name_are_dropped_and_last_entry_is_kept() {
        let entries = extract_marca_entries(SAMPLE);
        let numbers: Vec<_> = entries.iter().filter_map(|e| e.numero.as_deref()).collect();
        assert_eq!(numbers, vec!["4510769", "4510770", "4510772"]);

        let last = entries.last().unwrap();
        assert_eq!(last.kind, MarkKind::Mixed);
        assert_eq!(last.marca, "SOLARIS");
        assert_eq!(last.solicitante, None);
    }

    #[test]
    fn test_mark_line_before_any_acta_is_ignored() {
        let entries = extract_marca_entries("(40) D (54) HUERFANA\n(73) NADIE");
        assert!(entries.is_empty());
    }

    #[test]
    fn test_empty_text_has_no_entries() {
        assert!(extract_marca_entries("").is_empty());
    }
}
