use crate::model::{not_available, NOT_AVAILABLE};
use std::fmt;

/// A free-form location, optionally split into city and country
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// The raw location text as shown on the page
    pub full_string: String,

    /// City part, or the sentinel if the text had no separator
    pub city: String,

    /// Country part, or the sentinel if the text had no separator
    pub country: String,
}

impl Location {
    /// Parses raw location text of the form "City, Region, Country"
    ///
    /// The raw text is always retained in `full_string`. City and country are
    /// only filled when the text contains a comma; otherwise they keep the
    /// sentinel value.
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_scraper::model::Location;
    ///
    /// let loc = Location::parse("Milan, Lombardy, Italy");
    /// assert_eq!(loc.city, "Milan");
    /// assert_eq!(loc.country, "Italy");
    ///
    /// let loc = Location::parse("Remote");
    /// assert_eq!(loc.full_string, "Remote");
    /// assert_eq!(loc.city, "N/A");
    /// ```
    pub fn parse(raw: &str) -> Self {
        let mut location = Self {
            full_string: raw.to_string(),
            ..Self::default()
        };

        if raw.contains(',') {
            if let Some(city) = raw.split(',').next() {
                location.city = city.trim().to_string();
            }
            if let Some(country) = raw.rsplit(',').next() {
                location.country = country.trim().to_string();
            }
        }

        location
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            full_string: not_available(),
            city: not_available(),
            country: not_available(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.city == NOT_AVAILABLE && self.country == NOT_AVAILABLE {
            write!(f, "{}", self.full_string)
        } else {
            write!(f, "{}, {}", self.city, self.country)
        }
    }
}

/// An employer as shown on a profile or its company page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub name: String,
    pub industry: String,
}

impl Company {
    pub fn new(name: impl Into<String>, industry: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            industry: industry.into(),
        }
    }
}

impl Default for Company {
    fn default() -> Self {
        Self::new(not_available(), not_available())
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.industry)
    }
}

/// One position entry from the experience section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub company: Company,
    pub position: String,
    pub location: Location,
    /// Date range text exactly as displayed, e.g. "Jan 2019 – Present"
    pub daterange: String,
}

impl Default for Job {
    fn default() -> Self {
        Self {
            company: Company::default(),
            position: not_available(),
            location: Location::default(),
            daterange: not_available(),
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "company: {}", self.company)?;
        writeln!(f, "pos: {}", self.position)?;
        writeln!(f, "loc: {}", self.location)?;
        write!(f, "daterange: {}", self.daterange)
    }
}

/// One entry from the education section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Education {
    pub institution: String,
    pub degreename: String,
    pub field: String,
    pub start_year: String,
    pub end_year: String,
}

impl Default for Education {
    fn default() -> Self {
        Self {
            institution: not_available(),
            degreename: not_available(),
            field: not_available(),
            start_year: not_available(),
            end_year: not_available(),
        }
    }
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "institution: {}", self.institution)?;
        writeln!(f, "degree: {}, {}", self.degreename, self.field)?;
        write!(f, "dates: {} - {}", self.start_year, self.end_year)
    }
}
