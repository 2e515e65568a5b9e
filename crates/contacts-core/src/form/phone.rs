//! Phone number mask
//!
//! Numbers are entered and stored in the fixed international shape
//! `+<cc> (XX) XXX-XX-XX`.

/// Placeholder layout of the local part; `#` takes one digit
const LOCAL_TEMPLATE: &str = "(##) ###-##-##";

/// Number of digits the local part holds
const LOCAL_DIGITS: usize = 9;

/// Formats raw keyboard input into the phone mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneMask {
    country_code: String,
}

impl PhoneMask {
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
        }
    }

    /// Place the digits of `raw` into the mask
    ///
    /// Non-digits are ignored. A leading country code is dropped when the
    /// input carries more digits than the local part holds. Missing digits
    /// stay as `_` and extra digits are cut off.
    ///
    /// ```
    /// use contacts_core::form::PhoneMask;
    ///
    /// let mask = PhoneMask::new("998");
    /// assert_eq!(mask.apply("991234567"), "+998 (99) 123-45-67");
    /// assert_eq!(mask.apply("99 12"), "+998 (99) 12_-__-__");
    /// ```
    pub fn apply(&self, raw: &str) -> String {
        let mut digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();

        let code: Vec<char> = self.country_code.chars().collect();
        if digits.len() > LOCAL_DIGITS && digits.starts_with(&code) {
            digits.drain(..code.len());
        }

        let mut digits = digits.into_iter();
        let local: String = LOCAL_TEMPLATE
            .chars()
            .map(|c| match c {
                '#' => digits.next().unwrap_or('_'),
                other => other,
            })
            .collect();

        format!("+{} {}", self.country_code, local)
    }

    /// A filled-in example number, used in validation hints
    pub fn example(&self) -> String {
        format!("+{} (99) 999-99-99", self.country_code)
    }

    /// Regex matching a completely filled mask, ASCII digits only
    pub(crate) fn pattern(&self) -> String {
        format!(
            r"^\+{} \([0-9]{{2}}\) [0-9]{{3}}-[0-9]{{2}}-[0-9]{{2}}$",
            regex::escape(&self.country_code)
        )
    }
}

impl Default for PhoneMask {
    fn default() -> Self {
        Self::new("998")
    }
}
