use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

use super::error::DataError;
use super::filter;
use super::stats::{AggregateResult, Statistic};

/// Date format used throughout the source file and the query surface.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Borough – the fixed set of 33 London administrative divisions
// ---------------------------------------------------------------------------

/// One of the 33 London boroughs (the 32 boroughs plus the City of London).
/// The dataset's secondary key alongside the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Borough {
    BarkingAndDagenham,
    Barnet,
    Bexley,
    Brent,
    Bromley,
    Camden,
    CityOfLondon,
    Croydon,
    Ealing,
    Enfield,
    Greenwich,
    Hackney,
    HammersmithAndFulham,
    Haringey,
    Harrow,
    Havering,
    Hillingdon,
    Hounslow,
    Islington,
    KensingtonAndChelsea,
    KingstonUponThames,
    Lambeth,
    Lewisham,
    Merton,
    Newham,
    Redbridge,
    RichmondUponThames,
    Southwark,
    Sutton,
    TowerHamlets,
    WalthamForest,
    Wandsworth,
    Westminster,
}

impl Borough {
    /// Every borough, in alphabetical order of its canonical name.
    pub const ALL: [Borough; 33] = [
        Borough::BarkingAndDagenham,
        Borough::Barnet,
        Borough::Bexley,
        Borough::Brent,
        Borough::Bromley,
        Borough::Camden,
        Borough::CityOfLondon,
        Borough::Croydon,
        Borough::Ealing,
        Borough::Enfield,
        Borough::Greenwich,
        Borough::Hackney,
        Borough::HammersmithAndFulham,
        Borough::Haringey,
        Borough::Harrow,
        Borough::Havering,
        Borough::Hillingdon,
        Borough::Hounslow,
        Borough::Islington,
        Borough::KensingtonAndChelsea,
        Borough::KingstonUponThames,
        Borough::Lambeth,
        Borough::Lewisham,
        Borough::Merton,
        Borough::Newham,
        Borough::Redbridge,
        Borough::RichmondUponThames,
        Borough::Southwark,
        Borough::Sutton,
        Borough::TowerHamlets,
        Borough::WalthamForest,
        Borough::Wandsworth,
        Borough::Westminster,
    ];

    /// Canonical name as it appears in the source file.
    pub fn name(&self) -> &'static str {
        match self {
            Borough::BarkingAndDagenham => "Barking and Dagenham",
            Borough::Barnet => "Barnet",
            Borough::Bexley => "Bexley",
            Borough::Brent => "Brent",
            Borough::Bromley => "Bromley",
            Borough::Camden => "Camden",
            Borough::CityOfLondon => "City of London",
            Borough::Croydon => "Croydon",
            Borough::Ealing => "Ealing",
            Borough::Enfield => "Enfield",
            Borough::Greenwich => "Greenwich",
            Borough::Hackney => "Hackney",
            Borough::HammersmithAndFulham => "Hammersmith and Fulham",
            Borough::Haringey => "Haringey",
            Borough::Harrow => "Harrow",
            Borough::Havering => "Havering",
            Borough::Hillingdon => "Hillingdon",
            Borough::Hounslow => "Hounslow",
            Borough::Islington => "Islington",
            Borough::KensingtonAndChelsea => "Kensington and Chelsea",
            Borough::KingstonUponThames => "Kingston upon Thames",
            Borough::Lambeth => "Lambeth",
            Borough::Lewisham => "Lewisham",
            Borough::Merton => "Merton",
            Borough::Newham => "Newham",
            Borough::Redbridge => "Redbridge",
            Borough::RichmondUponThames => "Richmond upon Thames",
            Borough::Southwark => "Southwark",
            Borough::Sutton => "Sutton",
            Borough::TowerHamlets => "Tower Hamlets",
            Borough::WalthamForest => "Waltham Forest",
            Borough::Wandsworth => "Wandsworth",
            Borough::Westminster => "Westminster",
        }
    }
}

impl fmt::Display for Borough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A borough name that is not one of the 33 canonical names.
#[derive(Debug, Clone, Error)]
#[error("unknown borough: '{0}'")]
pub struct UnknownBorough(pub String);

impl FromStr for Borough {
    type Err = UnknownBorough;

    /// Exact, case-sensitive match on the canonical name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Borough::ALL
            .iter()
            .find(|b| b.name() == s)
            .copied()
            .ok_or_else(|| UnknownBorough(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Record – one day's data for one borough
// ---------------------------------------------------------------------------

/// A single dataset row. Constructed once by the loader, never mutated.
///
/// GMR fields are Google Mobility Report metrics: signed percentage-point
/// deviation from baseline movement for that category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub date: NaiveDate,
    pub borough: Borough,
    pub retail_recreation_gmr: i32,
    pub grocery_pharmacy_gmr: i32,
    pub parks_gmr: i32,
    pub transit_gmr: i32,
    pub workplaces_gmr: i32,
    pub residential_gmr: i32,
    pub new_cases: u32,
    pub total_cases: u32,
    pub new_deaths: u32,
    pub total_deaths: u32,
}

impl Record {
    /// Value of the selected numeric field, widened for aggregation.
    pub fn numeric(&self, field: NumericField) -> i64 {
        match field {
            NumericField::RetailRecreation => self.retail_recreation_gmr as i64,
            NumericField::GroceryPharmacy => self.grocery_pharmacy_gmr as i64,
            NumericField::Parks => self.parks_gmr as i64,
            NumericField::Transit => self.transit_gmr as i64,
            NumericField::Workplaces => self.workplaces_gmr as i64,
            NumericField::Residential => self.residential_gmr as i64,
            NumericField::NewCases => self.new_cases as i64,
            NumericField::TotalCases => self.total_cases as i64,
            NumericField::NewDeaths => self.new_deaths as i64,
            NumericField::TotalDeaths => self.total_deaths as i64,
        }
    }
}

impl fmt::Display for Record {
    /// Renders the record in the source file's own comma-separated layout.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            self.date.format(DATE_FORMAT),
            self.borough,
            self.retail_recreation_gmr,
            self.grocery_pharmacy_gmr,
            self.parks_gmr,
            self.transit_gmr,
            self.workplaces_gmr,
            self.residential_gmr,
            self.new_cases,
            self.total_cases,
            self.new_deaths,
            self.total_deaths,
        )
    }
}

// ---------------------------------------------------------------------------
// Field selectors
// ---------------------------------------------------------------------------

/// Selector over the numeric fields of a [`Record`], for sorting and
/// aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    RetailRecreation,
    GroceryPharmacy,
    Parks,
    Transit,
    Workplaces,
    Residential,
    NewCases,
    TotalCases,
    NewDeaths,
    TotalDeaths,
}

impl NumericField {
    /// Human label matching the original statistics panel wording.
    pub fn label(&self) -> &'static str {
        match self {
            NumericField::RetailRecreation => "Retail Recreation GMR",
            NumericField::GroceryPharmacy => "Grocery Pharmacy GMR",
            NumericField::Parks => "Parks GMR",
            NumericField::Transit => "Transit GMR",
            NumericField::Workplaces => "Workplaces GMR",
            NumericField::Residential => "Residential GMR",
            NumericField::NewCases => "New COVID Cases",
            NumericField::TotalCases => "Total COVID Cases",
            NumericField::NewDeaths => "New COVID Deaths",
            NumericField::TotalDeaths => "Total COVID Deaths",
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NumericField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "retail-recreation" => Ok(NumericField::RetailRecreation),
            "grocery-pharmacy" => Ok(NumericField::GroceryPharmacy),
            "parks" => Ok(NumericField::Parks),
            "transit" => Ok(NumericField::Transit),
            "workplaces" => Ok(NumericField::Workplaces),
            "residential" => Ok(NumericField::Residential),
            "new-cases" => Ok(NumericField::NewCases),
            "total-cases" => Ok(NumericField::TotalCases),
            "new-deaths" => Ok(NumericField::NewDeaths),
            "total-deaths" => Ok(NumericField::TotalDeaths),
            other => Err(format!("unknown field '{other}'")),
        }
    }
}

/// Sort selector: the date column or any numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Field(NumericField),
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "date" {
            Ok(SortKey::Date)
        } else {
            s.parse::<NumericField>().map(SortKey::Field)
        }
    }
}

// ---------------------------------------------------------------------------
// DateRange – validated inclusive range
// ---------------------------------------------------------------------------

/// Inclusive date range. Construction enforces `from <= to`; a reversed pair
/// is rejected, never silently swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, DataError> {
        if from > to {
            return Err(DataError::InvalidRange { from, to });
        }
        Ok(DateRange { from, to })
    }

    pub fn start(&self) -> NaiveDate {
        self.from
    }

    pub fn end(&self) -> NaiveDate {
        self.to
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.from.format(DATE_FORMAT),
            self.to.format(DATE_FORMAT)
        )
    }
}

// ---------------------------------------------------------------------------
// CovidDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Loaded once at session start and read-only
/// afterwards; every query operates on an immutable snapshot.
#[derive(Debug, Clone)]
pub struct CovidDataset {
    /// All records, in source-file order.
    pub records: Vec<Record>,
    /// Column titles from the header line.
    pub columns: Vec<String>,
    /// Number of source lines dropped by the loader's skip policy.
    pub skipped_lines: usize,
}

impl CovidDataset {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records inside `range`, optionally restricted to one borough and
    /// optionally sorted. An empty result is valid, not an error.
    pub fn query(
        &self,
        range: DateRange,
        borough: Option<Borough>,
        sort: Option<SortKey>,
        ascending: bool,
    ) -> Vec<Record> {
        let mut matched = filter::by_date_range(&self.records, range);
        if let Some(b) = borough {
            matched = filter::by_borough(&matched, b);
        }
        if let Some(key) = sort {
            matched = filter::sorted_by(&matched, key, ascending);
        }
        matched
    }

    /// Compute one statistic over the records inside `range`.
    pub fn aggregate(
        &self,
        range: DateRange,
        statistic: Statistic,
        field: NumericField,
    ) -> AggregateResult {
        let matched = filter::by_date_range(&self.records, range);
        statistic.compute(&matched, field)
    }
}
