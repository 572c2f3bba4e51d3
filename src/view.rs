//! Session state of the converter: the fetched rate table, the conversion
//! form and the last computed conversion.
//!
//! A [`ConverterView`] lives for one session. Mounting it fetches the rate
//! table once; everything after that is synchronous over resident data.

use crate::core::config::ConversionDefaults;
use crate::core::convert::{self, ConversionError};
use crate::core::rates::{self, RateEntry, RateProvider, RateTable};
use tracing::{debug, error, info};

/// User-controlled conversion inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionForm {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

impl From<&ConversionDefaults> for ConversionForm {
    fn from(defaults: &ConversionDefaults) -> Self {
        ConversionForm {
            from: defaults.from.to_uppercase(),
            to: defaults.to.to_uppercase(),
            amount: defaults.amount,
        }
    }
}

/// Snapshot of the inputs and output of the last triggered conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub value: f64,
}

pub struct ConverterView {
    rates: Option<RateTable>,
    mounted: bool,
    form: ConversionForm,
    last: Option<Conversion>,
}

impl ConverterView {
    pub fn new(defaults: &ConversionDefaults) -> Self {
        ConverterView {
            rates: None,
            mounted: false,
            form: ConversionForm::from(defaults),
            last: None,
        }
    }

    /// Fetches the rate table on first call. Later calls do nothing.
    ///
    /// Fetch failures are logged and leave the table absent. Returns whether
    /// a table is loaded.
    pub async fn mount(&mut self, provider: &dyn RateProvider, base: &str) -> bool {
        if self.mounted {
            debug!("View already mounted, skipping rate fetch");
            return self.rates.is_some();
        }
        self.mounted = true;

        match provider.fetch_rates(base).await {
            Ok(table) => {
                info!(base = %table.base(), count = table.len(), "Rate table loaded");
                self.rates = Some(table);
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch exchange rates");
            }
        }
        self.rates.is_some()
    }

    pub fn rates(&self) -> Option<&RateTable> {
        self.rates.as_ref()
    }

    /// Entries of the rate list; empty while no table is loaded.
    pub fn rate_list(&self) -> Vec<RateEntry> {
        self.rates.as_ref().map(rates::listed_rates).unwrap_or_default()
    }

    /// Candidate values for both currency selectors.
    pub fn currency_options(&self) -> Vec<&str> {
        self.rates
            .as_ref()
            .map(|t| t.codes().collect())
            .unwrap_or_default()
    }

    pub fn form(&self) -> &ConversionForm {
        &self.form
    }

    pub fn set_source(&mut self, code: &str) {
        self.form.from = code.trim().to_uppercase();
    }

    pub fn set_destination(&mut self, code: &str) {
        self.form.to = code.trim().to_uppercase();
    }

    pub fn set_amount(&mut self, amount: f64) {
        self.form.amount = amount;
    }

    /// Parses and applies user text; the form is untouched on error.
    pub fn set_amount_text(&mut self, input: &str) -> Result<(), ConversionError> {
        self.form.amount = convert::parse_amount(input)?;
        Ok(())
    }

    /// Runs the conversion for the current form.
    ///
    /// Without a rate table this is a no-op returning `Ok(None)`. On error the
    /// previous conversion is kept.
    pub fn convert(&mut self) -> Result<Option<f64>, ConversionError> {
        let Some(table) = self.rates.as_ref() else {
            debug!("Convert requested before rates were loaded");
            return Ok(None);
        };

        let value = convert::convert(self.form.amount, &self.form.from, &self.form.to, table)?;
        debug!(
            from = %self.form.from,
            to = %self.form.to,
            amount = self.form.amount,
            value,
            "Converted"
        );
        self.last = Some(Conversion {
            amount: self.form.amount,
            from: self.form.from.clone(),
            to: self.form.to.clone(),
            value,
        });
        Ok(Some(value))
    }

    pub fn last_conversion(&self) -> Option<&Conversion> {
        self.last.as_ref()
    }

    /// Display line for the last conversion, e.g. `10 USD = 50.00 BRL`.
    ///
    /// Hidden until something was converted, and for results that are not
    /// strictly positive.
    pub fn result_line(&self) -> Option<String> {
        self.last
            .as_ref()
            .filter(|c| c.value > 0.0)
            .map(|c| format!("{} {} = {:.2} {}", c.amount, c.from, c.value, c.to))
    }
}

impl Default for ConverterView {
    fn default() -> Self {
        Self::new(&ConversionDefaults::default())
    }
}
