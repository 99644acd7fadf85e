use super::normalizer::HeaderStyle;

/// Canonicalization contract for one kind of input file.
#[derive(Debug, Clone, Copy)]
pub struct SourceSchema {
    pub name: &'static str,
    pub header_style: HeaderStyle,
    pub renames: &'static [(&'static str, &'static str)],
    /// Accepted date column names in order of preference. Empty when the
    /// source carries no date.
    pub date_columns: &'static [&'static str],
}

pub mod columns {
    pub const COMPANY: &str = "empresa";
    pub const CLIENT_ID: &str = "id_cliente_erp";
    pub const SALESPERSON: &str = "vendedor";
    pub const ROUTE_ID: &str = "id_ruta";
    pub const DATE: &str = "fecha";
    pub const VISITED: &str = "visitado";
    pub const SALE_TIME: &str = "hora_venta";
    pub const MOTIVE_TIME: &str = "hora_motivo";
    pub const PHOTO_TIME: &str = "fh_foto";

    pub const ROUTE: &str = "ruta";
    pub const LOCALITY: &str = "localidad";
    pub const PLANNED_VISITS: &str = "visitas_planeadas";
    pub const REALIZED_VISITS: &str = "visitados";
    pub const UNITS_SOLD: &str = "cantidad_total_bultos";
    pub const IN_ROUTE_SALES: &str = "venta_en_el_pdv";
    pub const OFF_ROUTE_SALES: &str = "venta_a_distancia";
}

pub const ROSTER: SourceSchema = SourceSchema {
    name: "roster",
    header_style: HeaderStyle::Basic,
    renames: &[("ruta", "id_ruta"), ("cliente", "id_cliente_erp")],
    date_columns: &[],
};

pub const VISITS: SourceSchema = SourceSchema {
    name: "visits",
    header_style: HeaderStyle::Basic,
    renames: &[
        ("sector", "vendedor"),
        ("f/h_foto", "fh_foto"),
        ("descripción_cliente", "descripcion_cliente"),
        ("cliente", "id_cliente_erp"),
    ],
    date_columns: &["fecha"],
};

pub const OFF_ROUTE: SourceSchema = SourceSchema {
    name: "off-route sales",
    header_style: HeaderStyle::Basic,
    renames: &[("cliente", "id_cliente_erp")],
    date_columns: &["fecha"],
};

pub const DAILY_ACTIVITY: SourceSchema = SourceSchema {
    name: "daily activity",
    header_style: HeaderStyle::Folded,
    renames: &[],
    date_columns: &["fecha", "dia"],
};
