//! CSV Import service
//!
//! Imports spending history from CSV files: column mapping, header
//! detection, lenient date and amount parsing, and batch import with
//! per-row error reporting.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};

use crate::audit::{AuditEntry, EntityType};
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{Category, Expense, Money, SpendRecord, User};
use crate::storage::Storage;

/// Date formats tried after the mapping's own format
const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d/%m/%Y", "%d/%m/%y", "%Y/%m/%d", "%m-%d-%Y", "%d-%m-%Y",
];

/// Column mapping configuration for CSV import
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    pub date_column: usize,
    pub amount_column: usize,
    /// Missing or unrecognised categories import as `Other`
    pub category_column: Option<usize>,
    pub description_column: Option<usize>,
    /// Date format string (e.g., "%Y-%m-%d", "%m/%d/%Y")
    pub date_format: String,
    pub has_header: bool,
    pub delimiter: char,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date_column: 0,
            amount_column: 1,
            category_column: Some(2),
            description_column: Some(3),
            date_format: "%Y-%m-%d".to_string(),
            has_header: true,
            delimiter: ',',
        }
    }
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two-column daily totals: `Date,Amount`
    pub fn date_amount() -> Self {
        Self {
            category_column: None,
            description_column: None,
            ..Self::default()
        }
    }

    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// A parsed row from the CSV before import
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExpense {
    pub date: NaiveDate,
    /// Always positive; outflows written as negatives are flipped
    pub amount: Money,
    pub category: Category,
    pub description: String,
    /// Data row number, starting at 1 (header excluded)
    pub row_number: usize,
}

impl ParsedExpense {
    pub fn spend_record(&self) -> SpendRecord {
        SpendRecord::new(self.date, self.category, self.amount)
    }
}

/// Outcome of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub errors: usize,
    pub imported_ids: Vec<String>,
    /// Error messages by data row number
    pub error_messages: BTreeMap<usize, String>,
}

pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parse a CSV file, detecting its columns from the first row
    pub fn parse_csv_file(&self, path: &Path) -> BudgetwiseResult<Vec<Result<ParsedExpense, String>>> {
        let file = std::fs::File::open(path).map_err(|e| {
            BudgetwiseError::Import(format!("Cannot open {}: {}", path.display(), e))
        })?;
        self.parse_csv_detecting(file)
    }

    /// Parse CSV data, detecting the column mapping from the first row
    pub fn parse_csv_detecting<R: Read>(
        &self,
        reader: R,
    ) -> BudgetwiseResult<Vec<Result<ParsedExpense, String>>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = reader.records();
        let first = match records.next() {
            Some(record) => record?,
            None => return Ok(Vec::new()),
        };
        let mapping = detect_mapping_from_headers(&first);
        tracing::debug!(?mapping, "detected CSV column mapping");

        let mut results = Vec::new();
        if !mapping.has_header {
            results.push(parse_record(&first, 1, &mapping));
        }
        for result in records {
            let row_number = results.len() + 1;
            results.push(match result {
                Ok(record) => parse_record(&record, row_number, &mapping),
                Err(e) => Err(format!("Error reading CSV record: {}", e)),
            });
        }
        Ok(results)
    }

    /// Parse CSV data with an explicit column mapping
    pub fn parse_csv_from_reader<R: Read>(
        &self,
        reader: R,
        mapping: &ColumnMapping,
    ) -> BudgetwiseResult<Vec<Result<ParsedExpense, String>>> {
        let mut delimiter = [0u8; 4];
        let delimiter = mapping.delimiter.encode_utf8(&mut delimiter).as_bytes();
        if delimiter.len() != 1 {
            return Err(BudgetwiseError::Import(format!(
                "Delimiter must be a single byte, got '{}'",
                mapping.delimiter
            )));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(mapping.has_header)
            .delimiter(delimiter[0])
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        Ok(reader
            .records()
            .enumerate()
            .map(|(idx, result)| match result {
                Ok(record) => parse_record(&record, idx + 1, mapping),
                Err(e) => Err(format!("Error reading CSV record: {}", e)),
            })
            .collect())
    }

    /// Store every successfully parsed row as an expense of `user`
    ///
    /// Bulk history import does not check budgets. Rows that failed to
    /// parse or validate are counted and reported, the rest are written in
    /// one transaction.
    pub fn import_expenses(
        &self,
        user: &User,
        parsed: &[Result<ParsedExpense, String>],
    ) -> BudgetwiseResult<ImportResult> {
        let mut result = ImportResult::default();
        let mut expenses = Vec::new();

        for (idx, row) in parsed.iter().enumerate() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    result.errors += 1;
                    result.error_messages.insert(idx + 1, e.clone());
                    continue;
                }
            };

            let expense = Expense::new(user.id, row.category, row.amount, row.description.clone(), row.date);
            if let Err(e) = expense.validate() {
                result.errors += 1;
                result.error_messages.insert(row.row_number, e.to_string());
                continue;
            }
            expenses.push(expense);
        }

        if expenses.is_empty() {
            return Ok(result);
        }

        self.storage.transaction(|s| {
            for expense in &expenses {
                s.expenses.upsert(expense.clone())?;
            }
            Ok(())
        })?;

        let entries: Vec<AuditEntry> = expenses
            .iter()
            .map(|e| {
                AuditEntry::create(
                    EntityType::Expense,
                    e.id.to_string(),
                    Some(format!("{} {} (import)", e.category, e.amount)),
                    e,
                )
            })
            .collect();
        self.storage.log_batch(&entries)?;

        result.imported = expenses.len();
        result.imported_ids = expenses.iter().map(|e| e.id.to_string()).collect();

        tracing::info!(
            user = %user.id,
            imported = result.imported,
            errors = result.errors,
            "expense import finished"
        );
        Ok(result)
    }
}

/// Detect the column mapping from the first CSV record
///
/// A first row whose first field parses as a date is data, not a header;
/// such files are read with the default positional layout.
pub fn detect_mapping_from_headers(headers: &StringRecord) -> ColumnMapping {
    if looks_like_data_row(headers) {
        let mapping = if headers.len() <= 2 {
            ColumnMapping::date_amount()
        } else {
            ColumnMapping::default()
        };
        return mapping.with_header(false);
    }

    let mut mapping = ColumnMapping::date_amount();
    let mut amount_found = false;

    for (idx, header) in headers.iter().enumerate() {
        let h = header.trim().to_lowercase();

        if h.contains("date") || h == "day" {
            mapping.date_column = idx;
        } else if !amount_found
            && (h.contains("amount") || h.contains("spent") || h.contains("cost") || h == "total")
        {
            mapping.amount_column = idx;
            amount_found = true;
        } else if h.contains("category") || h == "type" {
            mapping.category_column = Some(idx);
        } else if h.contains("description")
            || h.contains("note")
            || h.contains("memo")
            || h.contains("merchant")
            || h.contains("payee")
        {
            mapping.description_column = Some(idx);
        }
    }

    mapping
}

fn looks_like_data_row(record: &StringRecord) -> bool {
    record
        .get(0)
        .map(|first| parse_date(first.trim(), "%Y-%m-%d").is_ok())
        .unwrap_or(false)
}

fn parse_record(
    record: &StringRecord,
    row_number: usize,
    mapping: &ColumnMapping,
) -> Result<ParsedExpense, String> {
    let date_str = record
        .get(mapping.date_column)
        .ok_or_else(|| format!("Row {}: missing date column", row_number))?
        .trim();
    let date = parse_date(date_str, &mapping.date_format)
        .map_err(|e| format!("Row {}: {}", row_number, e))?;

    let amount_str = record
        .get(mapping.amount_column)
        .ok_or_else(|| format!("Row {}: missing amount column", row_number))?
        .trim();
    let amount = parse_amount_string(amount_str)
        .map_err(|e| format!("Row {}: {}", row_number, e))?
        .abs();

    let category = mapping
        .category_column
        .and_then(|col| record.get(col))
        .map(Category::parse_or_other)
        .unwrap_or(Category::Other);

    let description = mapping
        .description_column
        .and_then(|col| record.get(col))
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    Ok(ParsedExpense {
        date,
        amount,
        category,
        description,
        row_number,
    })
}

/// Parse a date string, trying `primary_format` first
fn parse_date(s: &str, primary_format: &str) -> Result<NaiveDate, String> {
    if let Ok(date) = NaiveDate::parse_from_str(s, primary_format) {
        return Ok(date);
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .ok_or_else(|| format!("Could not parse date: '{}'", s))
}

/// Parse an amount, tolerating currency symbols and accounting parentheses
fn parse_amount_string(s: &str) -> Result<Money, String> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '(' | ')'))
        .collect();

    let (is_negative, value) = if cleaned.starts_with('(') && cleaned.ends_with(')') {
        (true, &cleaned[1..cleaned.len() - 1])
    } else if let Some(stripped) = cleaned.strip_prefix('-') {
        (true, stripped)
    } else {
        (false, cleaned.as_str())
    };

    if value.is_empty() {
        return Err(format!("Could not parse amount '{}'", s));
    }

    Money::parse(value)
        .map(|m| if is_negative { -m } else { m })
        .map_err(|e| format!("Could not parse amount '{}': {}", s, e))
}
