use super::dates::parse_date_column;
use super::schema::{columns, SourceSchema};
use super::table::{cell_at, Cell, Table};
use super::{IngestError, Loaded};
use crate::workflows::activity::{
    ClientId, ClientRecord, OffRouteRecord, RouteId, SalespersonId, VisitEvidence, VisitRecord,
};
use crate::workflows::daily::DailyActivityRecord;
use chrono::NaiveDate;

fn require_column(
    table: &Table,
    schema: &SourceSchema,
    column: &str,
) -> Result<usize, IngestError> {
    table
        .column_index(column)
        .ok_or_else(|| IngestError::MissingColumn {
            source_name: schema.name,
            column: column.to_string(),
            found: table.columns().to_vec(),
        })
}

/// Finds the first accepted date column and decodes it for every row.
pub(crate) fn resolve_dates(
    table: &Table,
    schema: &SourceSchema,
) -> Result<Vec<Option<NaiveDate>>, IngestError> {
    let index = schema
        .date_columns
        .iter()
        .find_map(|name| table.column_index(name))
        .ok_or_else(|| IngestError::MissingDateColumn {
            source_name: schema.name,
            accepted: schema.date_columns.iter().map(|name| name.to_string()).collect(),
            found: table.columns().to_vec(),
        })?;

    Ok(parse_date_column(&table.column_cells(index)))
}

fn affirmative(cell: &Cell) -> bool {
    cell.as_text()
        .map(|value| matches!(value.to_lowercase().as_str(), "si" | "sí"))
        .unwrap_or(false)
}

fn text_or_blank(cell: &Cell) -> String {
    cell.as_key().unwrap_or_default()
}

/// Every roster row is kept. Blank client ids or salespeople stay blank so
/// the row is still classified.
pub(crate) fn parse_roster(
    table: &Table,
    schema: &SourceSchema,
) -> Result<Loaded<ClientRecord>, IngestError> {
    let company = require_column(table, schema, columns::COMPANY)?;
    let client = require_column(table, schema, columns::CLIENT_ID)?;
    let salesperson = require_column(table, schema, columns::SALESPERSON)?;
    let route = require_column(table, schema, columns::ROUTE_ID)?;

    let records = table
        .rows()
        .map(|row| ClientRecord {
            company: text_or_blank(cell_at(row, Some(company))),
            client_id: ClientId(text_or_blank(cell_at(row, Some(client)))),
            salesperson: SalespersonId(text_or_blank(cell_at(row, Some(salesperson)))),
            route: RouteId(text_or_blank(cell_at(row, Some(route)))),
        })
        .collect();

    Ok(Loaded {
        records,
        skipped: 0,
    })
}

/// Evidence columns are optional; a missing column never proves an action.
pub(crate) fn parse_visits(
    table: &Table,
    schema: &SourceSchema,
) -> Result<Loaded<VisitRecord>, IngestError> {
    let client = require_column(table, schema, columns::CLIENT_ID)?;
    let salesperson = require_column(table, schema, columns::SALESPERSON)?;
    let dates = resolve_dates(table, schema)?;

    let visited = table.column_index(columns::VISITED);
    let sale = table.column_index(columns::SALE_TIME);
    let motive = table.column_index(columns::MOTIVE_TIME);
    let photo = table.column_index(columns::PHOTO_TIME);

    let mut loaded = Loaded::default();
    for (row, visited_on) in table.rows().zip(dates) {
        let (Some(client_id), Some(salesperson_id)) = (
            cell_at(row, Some(client)).as_key(),
            cell_at(row, Some(salesperson)).as_key(),
        ) else {
            loaded.skipped += 1;
            continue;
        };

        loaded.records.push(VisitRecord {
            client_id: ClientId(client_id),
            salesperson: SalespersonId(salesperson_id),
            visited_on,
            evidence: VisitEvidence {
                visited: affirmative(cell_at(row, visited)),
                sale_recorded: !cell_at(row, sale).is_empty(),
                motive_recorded: !cell_at(row, motive).is_empty(),
                photo_recorded: !cell_at(row, photo).is_empty(),
            },
        });
    }

    Ok(loaded)
}

pub(crate) fn parse_off_route(
    table: &Table,
    schema: &SourceSchema,
) -> Result<Loaded<OffRouteRecord>, IngestError> {
    let client = require_column(table, schema, columns::CLIENT_ID)?;
    let dates = resolve_dates(table, schema)?;

    let mut loaded = Loaded::default();
    for (row, sold_on) in table.rows().zip(dates) {
        match cell_at(row, Some(client)).as_key() {
            Some(client_id) => loaded.records.push(OffRouteRecord {
                client_id: ClientId(client_id),
                sold_on,
            }),
            None => loaded.skipped += 1,
        }
    }

    Ok(loaded)
}

/// Rows without a usable date are dropped and counted as skipped.
pub(crate) fn parse_daily_activity(
    table: &Table,
    schema: &SourceSchema,
) -> Result<Loaded<DailyActivityRecord>, IngestError> {
    let dates = resolve_dates(table, schema)?;
    let route = require_column(table, schema, columns::ROUTE)?;
    let salesperson = require_column(table, schema, columns::SALESPERSON)?;
    let locality = require_column(table, schema, columns::LOCALITY)?;
    let planned = require_column(table, schema, columns::PLANNED_VISITS)?;
    let realized = require_column(table, schema, columns::REALIZED_VISITS)?;
    let units = require_column(table, schema, columns::UNITS_SOLD)?;
    let in_route = require_column(table, schema, columns::IN_ROUTE_SALES)?;
    let off_route = require_column(table, schema, columns::OFF_ROUTE_SALES)?;

    let mut loaded = Loaded::default();
    for (row, date) in table.rows().zip(dates) {
        let Some(date) = date else {
            loaded.skipped += 1;
            continue;
        };

        loaded.records.push(DailyActivityRecord {
            route: text_or_blank(cell_at(row, Some(route))),
            salesperson: text_or_blank(cell_at(row, Some(salesperson))),
            locality: text_or_blank(cell_at(row, Some(locality))),
            date,
            planned_visits: cell_at(row, Some(planned)).as_number(),
            realized_visits: cell_at(row, Some(realized)).as_number(),
            units_sold: cell_at(row, Some(units)).as_number(),
            in_route_sales: cell_at(row, Some(in_route)).as_number(),
            off_route_sales: cell_at(row, Some(off_route)).as_number(),
        });
    }

    Ok(loaded)
}
