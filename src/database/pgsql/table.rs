// 3rd party imports
use anyhow::Result;
use postgres::types::ToSql;
use postgres::{GenericClient, Row};

/// Returns `$1, $2, ...` for each column of the comma separated column list
///
/// # Arguments
/// * `cols` - Columns separated by `, `
///
pub fn placeholders_for(cols: &str) -> String {
    cols.split(", ")
        .enumerate()
        .map(|(i, _)| format!("${}", i + 1))
        .collect::<Vec<String>>()
        .join(", ")
}

/// Defines common operations for a database table
///
pub trait Table<R: From<Row>> {
    /// Returns the name of the table
    ///
    fn table_name() -> &'static str;

    /// Returns select columns
    ///
    fn select_cols() -> &'static str;

    /// Builds `SELECT <cols> FROM <table> <additional>`
    ///
    fn select_statement(cols: &str, additional: &str) -> String {
        let mut statement = format!("SELECT {} FROM {}", cols, Self::table_name());
        if !additional.is_empty() {
            statement += " ";
            statement += additional;
        }
        statement
    }

    /// Selects records and returns them as rows.
    ///
    /// # Arguments
    /// * `cols` - The columns to select
    /// * `additional` - Additional SQL to add to the query , e.g "WHERE accession = $1"
    /// * `params` - The parameters to use in the query
    ///
    fn raw_select_multiple<C: GenericClient>(
        client: &mut C,
        cols: &str,
        additional: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>> {
        Ok(client.query(&Self::select_statement(cols, additional), params)?)
    }

    /// Selects a record and returns it as row. If no record is found, None is returned.
    ///
    /// # Arguments
    /// * `cols` - The columns to select
    /// * `additional` - Additional SQL to add to the query , e.g "WHERE accession = $1"
    /// * `params` - The parameters to use in the query
    ///
    fn raw_select<C: GenericClient>(
        client: &mut C,
        cols: &str,
        additional: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>> {
        Ok(client.query_opt(&Self::select_statement(cols, additional), params)?)
    }

    /// Selects records and returns them.
    ///
    /// # Arguments
    /// * `additional` - Additional SQL to add to the query , e.g "WHERE accession = $1"
    /// * `params` - The parameters to use in the query
    ///
    fn select_multiple<C: GenericClient>(
        client: &mut C,
        additional: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<R>> {
        let rows = Self::raw_select_multiple(client, Self::select_cols(), additional, params)?;
        Ok(rows.into_iter().map(R::from).collect())
    }

    /// Selects a record and returns it. If no record is found, None is returned.
    ///
    /// # Arguments
    /// * `additional` - Additional SQL to add to the query , e.g "WHERE accession = $1"
    /// * `params` - The parameters to use in the query
    ///
    fn select<C: GenericClient>(
        client: &mut C,
        additional: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<R>> {
        let row = Self::raw_select(client, Self::select_cols(), additional, params)?;
        Ok(row.map(R::from))
    }
}
