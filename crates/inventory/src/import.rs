//! Bulk import from delimited text files.
//!
//! Format: UTF-8, one header line (ignored), then
//! `code,name,category,quantity,price` per line. Records that are too short
//! or whose numbers do not parse are dropped silently.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use kiputech_core::{DomainError, DomainResult};
use kiputech_products::{CodeSequence, Product, ProductDraft};

const FIELDS_PER_RECORD: usize = 5;

/// Parses import files into candidate products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Importer {
    delimiter: char,
}

impl Importer {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Read every valid record of `path` as a product.
    ///
    /// Candidates draw codes from `codes` exactly like hand-entered products,
    /// so manual codes in the file raise the sequence floor even if the
    /// caller later discards the candidate as a duplicate.
    pub fn import(&self, path: impl AsRef<Path>, codes: &mut CodeSequence) -> DomainResult<Vec<Product>> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DomainError::file_not_found(path));
        }
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DomainError::file_not_found(path),
            _ => DomainError::import_failed(format!("{}: {e}", path.display())),
        })?;

        let read_failed = |line_no: usize, e: std::io::Error| {
            DomainError::import_failed(format!("{}:{line_no}: {e}", path.display()))
        };

        let mut lines = BufReader::new(file).lines();
        // The header is discarded, but it still has to be readable.
        if let Some(header) = lines.next() {
            header.map_err(|e| read_failed(1, e))?;
        }

        let mut products = Vec::new();
        for (index, line) in lines.enumerate() {
            let line_no = index + 2;
            let line = line.map_err(|e| read_failed(line_no, e))?;
            let line = line.trim_end_matches('\r');

            let fields = split_record(line, self.delimiter);
            if fields.len() < FIELDS_PER_RECORD {
                continue;
            }
            match record_to_product(&fields, codes) {
                Ok(product) => products.push(product),
                Err(err) => {
                    tracing::debug!(line = line_no, error = %err, "skipping import record");
                }
            }
        }
        Ok(products)
    }
}

impl Default for Importer {
    fn default() -> Self {
        Self::new(',')
    }
}

fn record_to_product(fields: &[String], codes: &mut CodeSequence) -> DomainResult<Product> {
    let [code, name, category, quantity, price] = [0, 1, 2, 3, 4].map(|i| fields[i].as_str());
    let draft = ProductDraft::parse(name, category, quantity, price)?.with_code(code);
    Product::new(draft, codes)
}

/// Split one line on `delimiter`, honouring double-quoted fields.
///
/// Inside quotes the delimiter is literal and `""` is an escaped quote.
/// Quoted fields spanning several lines are not supported.
fn split_record(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.is_empty() => in_quotes = true,
            c if c == delimiter && !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}
