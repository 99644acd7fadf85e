use super::table::{RawTable, Table};

/// Header canonicalization rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// Trim, lowercase, spaces to underscores.
    Basic,
    /// `Basic` plus accent folding and parenthesis removal.
    Folded,
}

pub(crate) fn normalize_header(value: &str, style: HeaderStyle) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let lowered = cleaned.trim().to_lowercase().replace(' ', "_");

    match style {
        HeaderStyle::Basic => lowered,
        HeaderStyle::Folded => lowered
            .chars()
            .filter(|ch| !matches!(ch, '(' | ')'))
            .map(fold_accent)
            .collect(),
    }
}

fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        other => other,
    }
}

/// Index columns written by dataframe exports, or columns with no header.
fn is_index_artifact(normalized: &str) -> bool {
    normalized.is_empty() || normalized.starts_with("unnamed:")
}

/// Canonicalizes headers, applies the source renames and drops index
/// artifacts together with their cells.
pub(crate) fn normalize_table(
    raw: RawTable,
    style: HeaderStyle,
    renames: &[(&str, &str)],
) -> Table {
    let RawTable { headers, rows } = raw;

    let kept: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| (index, normalize_header(header, style)))
        .filter(|(_, name)| !is_index_artifact(name))
        .map(|(index, name)| {
            let renamed = renames
                .iter()
                .find(|(from, _)| normalize_header(from, style) == name)
                .map(|(_, to)| (*to).to_string())
                .unwrap_or(name);
            (index, renamed)
        })
        .collect();

    let columns = kept.iter().map(|(_, name)| name.clone()).collect();
    let rows = rows
        .into_iter()
        .map(|row| {
            kept.iter()
                .map(|(index, _)| row.get(*index).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    Table::new(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::ingest::table::Cell;

    #[test]
    fn basic_style_only_trims_lowercases_and_underscores() {
        assert_eq!(normalize_header("  Hora Venta ", HeaderStyle::Basic), "hora_venta");
        assert_eq!(
            normalize_header("Descripción Cliente", HeaderStyle::Basic),
            "descripción_cliente"
        );
        assert_eq!(normalize_header("F/H Foto", HeaderStyle::Basic), "f/h_foto");
    }

    #[test]
    fn folded_style_strips_accents_and_parentheses() {
        assert_eq!(
            normalize_header("Cantidad Total (Bultos)", HeaderStyle::Folded),
            "cantidad_total_bultos"
        );
        assert_eq!(normalize_header("Día", HeaderStyle::Folded), "dia");
        assert_eq!(normalize_header("Año", HeaderStyle::Folded), "ano");
        assert_eq!(
            normalize_header("\u{feff}Venta en el PDV", HeaderStyle::Folded),
            "venta_en_el_pdv"
        );
    }

    #[test]
    fn index_columns_are_dropped_with_their_cells() {
        let raw = RawTable {
            headers: vec!["Unnamed: 0".into(), "Cliente".into(), "Fecha".into()],
            rows: vec![vec![
                Cell::Number(0.0),
                Cell::Text("C1".into()),
                Cell::Text("01/12/2025".into()),
            ]],
        };

        let table = normalize_table(raw, HeaderStyle::Basic, &[("cliente", "id_cliente_erp")]);
        assert_eq!(table.columns(), ["id_cliente_erp", "fecha"]);
        let row = table.rows().next().expect("row present");
        assert_eq!(row[0], Cell::Text("C1".into()));
    }

    #[test]
    fn short_rows_are_padded_with_empty_cells() {
        let raw = RawTable {
            headers: vec!["a".into(), "b".into()],
            rows: vec![vec![Cell::Text("x".into())]],
        };
        let table = normalize_table(raw, HeaderStyle::Basic, &[]);
        let row = table.rows().next().expect("row present");
        assert_eq!(row, [Cell::Text("x".into()), Cell::Empty]);
    }
}
