//! C-compatible Foreign Function Interface (FFI) for co2-estimator
//!
//! This module provides C-compatible bindings that allow the calculator and
//! route catalog to be used from C, C++, Python (via ctypes), and other
//! languages that support calling C libraries.
//!
//! # Memory Management
//!
//! - All string parameters should be null-terminated UTF-8 C strings (char*)
//! - Returned strings are allocated by Rust and must be freed with `co2_free_string()`
//! - Numeric results are written through caller-owned out pointers
//!
//! # Error Handling
//!
//! All functions return a Co2Result code:
//! - 0: Success
//! - 1: Invalid parameter
//! - 2: Not found (unknown route, city or mode)
//! - 3: Calculation abstained (invalid numeric input)
//! - 4: Unknown error

use std::ffi::{CStr, CString};
use std::ptr;

use libc::{c_char, c_double};
use once_cell::sync::Lazy;

use crate::{Error, Estimator, PriceEstimate, TripRequest};

/// Default estimator shared by all C calls
static ESTIMATOR: Lazy<Estimator> = Lazy::new(Estimator::new);

/// Result codes for C FFI
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Co2Result {
    Success = 0,
    InvalidParameter = 1,
    NotFound = 2,
    Abstained = 3,
    UnknownError = 4,
}

/// Price range written by `co2_estimate_credit_price`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Co2PriceEstimate {
    pub min: c_double,
    pub max: c_double,
    pub average: c_double,
}

impl From<PriceEstimate> for Co2PriceEstimate {
    fn from(price: PriceEstimate) -> Self {
        Self {
            min: price.min,
            max: price.max,
            average: price.average,
        }
    }
}

/// Convert a library error to a C result code
fn convert_error(err: &Error) -> Co2Result {
    match err {
        Error::InvalidInput(_) => Co2Result::InvalidParameter,
        Error::RouteNotFound { .. } | Error::UnknownMode(_) => Co2Result::NotFound,
        Error::CalculationFailed(_) => Co2Result::Abstained,
        _ => Co2Result::UnknownError,
    }
}

/// Borrow a C string as UTF-8, `None` for NULL or invalid UTF-8
fn c_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

/// Hand a Rust string to C, NULL if it contains an interior NUL
fn into_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c_string) => c_string.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Write `value` through `out` when it is present
fn write_out<T>(out: *mut T, value: Option<T>) -> Co2Result {
    match value {
        Some(v) => {
            unsafe { *out = v };
            Co2Result::Success
        }
        None => Co2Result::Abstained,
    }
}

/// Emission in kg CO2 for a distance and transport mode
///
/// # Parameters
/// - `distance_km`: Distance travelled
/// - `mode`: Transport mode id (null-terminated string)
/// - `out_kg`: Receives the emission rounded to 2 decimals
///
/// # Returns
/// Co2Result code; `Abstained` for a negative/non-finite distance or unknown mode
#[no_mangle]
pub extern "C" fn co2_calculate_emission(
    distance_km: c_double,
    mode: *const c_char,
    out_kg: *mut c_double,
) -> Co2Result {
    if out_kg.is_null() {
        return Co2Result::InvalidParameter;
    }
    let Some(mode) = c_str(mode) else {
        return Co2Result::InvalidParameter;
    };
    write_out(out_kg, ESTIMATOR.calculator().calculate_emission(distance_km, mode))
}

/// Carbon credits needed to offset an emission
///
/// # Parameters
/// - `emission_kg`: Emission in kg CO2
/// - `out_credits`: Receives the credit count rounded to 4 decimals
#[no_mangle]
pub extern "C" fn co2_calculate_carbon_credits(
    emission_kg: c_double,
    out_credits: *mut c_double,
) -> Co2Result {
    if out_credits.is_null() {
        return Co2Result::InvalidParameter;
    }
    write_out(
        out_credits,
        ESTIMATOR.calculator().calculate_carbon_credits(emission_kg),
    )
}

/// Price range for a number of carbon credits
///
/// # Parameters
/// - `credits`: Credit count
/// - `out_price`: Receives min, max and average price
#[no_mangle]
pub extern "C" fn co2_estimate_credit_price(
    credits: c_double,
    out_price: *mut Co2PriceEstimate,
) -> Co2Result {
    if out_price.is_null() {
        return Co2Result::InvalidParameter;
    }
    write_out(
        out_price,
        ESTIMATOR
            .calculator()
            .estimate_credit_price(credits)
            .map(Co2PriceEstimate::from),
    )
}

/// Catalog distance between two cities, in either direction
///
/// # Parameters
/// - `origin`, `destination`: City names (null-terminated strings)
/// - `out_km`: Receives the distance
///
/// # Returns
/// `NotFound` when the catalog has no such route
#[no_mangle]
pub extern "C" fn co2_find_distance(
    origin: *const c_char,
    destination: *const c_char,
    out_km: *mut c_double,
) -> Co2Result {
    if out_km.is_null() {
        return Co2Result::InvalidParameter;
    }
    let (Some(origin), Some(destination)) = (c_str(origin), c_str(destination)) else {
        return Co2Result::InvalidParameter;
    };
    match ESTIMATOR.catalog().find_distance(origin, destination) {
        Some(km) => write_out(out_km, Some(km)),
        None => Co2Result::NotFound,
    }
}

/// All catalog cities as a JSON array
///
/// # Returns
/// Allocated string that must be freed with `co2_free_string()`, or NULL on error
#[no_mangle]
pub extern "C" fn co2_list_cities_json() -> *mut c_char {
    match serde_json::to_string(&ESTIMATOR.catalog().list_cities()) {
        Ok(json) => into_c_string(json),
        Err(_) => ptr::null_mut(),
    }
}

/// Full trip estimate as a JSON document
///
/// # Parameters
/// - `origin`, `destination`: City names (null-terminated strings)
/// - `distance_km`: Manual distance, or a value <= 0 to look the route up
/// - `mode`: Transport mode id
/// - `out_json`: Receives an allocated JSON string to free with `co2_free_string()`
#[no_mangle]
pub extern "C" fn co2_estimate_json(
    origin: *const c_char,
    destination: *const c_char,
    distance_km: c_double,
    mode: *const c_char,
    out_json: *mut *mut c_char,
) -> Co2Result {
    if out_json.is_null() {
        return Co2Result::InvalidParameter;
    }
    let (Some(origin), Some(destination), Some(mode)) =
        (c_str(origin), c_str(destination), c_str(mode))
    else {
        return Co2Result::InvalidParameter;
    };

    let mut request = TripRequest::new(origin, destination, mode);
    if distance_km > 0.0 {
        request = request.with_distance(distance_km);
    }

    let report = match ESTIMATOR.estimate(&request) {
        Ok(report) => report,
        Err(err) => return convert_error(&err),
    };

    match serde_json::to_string(&report) {
        Ok(json) => {
            let c_json = into_c_string(json);
            if c_json.is_null() {
                return Co2Result::UnknownError;
            }
            unsafe { *out_json = c_json };
            Co2Result::Success
        }
        Err(_) => Co2Result::UnknownError,
    }
}

/// Free a string allocated by the library
///
/// # Parameters
/// - `ptr`: String pointer returned by library functions
#[no_mangle]
pub extern "C" fn co2_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            drop(CString::from_raw(ptr));
        }
    }
}

/// Get library version string
///
/// # Returns
/// Static string with version information (does not need to be freed)
#[no_mangle]
pub extern "C" fn co2_version() -> *const c_char {
    static VERSION_STRING: Lazy<CString> = Lazy::new(|| {
        CString::new(format!("co2-estimator {}", env!("CO2_ESTIMATOR_VERSION")))
            .unwrap_or_default()
    });
    VERSION_STRING.as_ptr()
}

/// Initialize the library (optional, called automatically)
///
/// Builds the default configuration and route catalog early.
#[no_mangle]
pub extern "C" fn co2_init() -> Co2Result {
    Lazy::force(&ESTIMATOR);
    Co2Result::Success
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_co2_version() {
        let version = co2_version();
        let version_str = unsafe { CStr::from_ptr(version) }.to_str().unwrap();
        assert!(version_str.contains("co2-estimator"));
        assert!(version_str.contains(env!("CO2_ESTIMATOR_VERSION")));
    }

    #[test]
    fn test_co2_calculate_emission() {
        let mode = CString::new("truck").unwrap();
        let mut kg = 0.0;
        assert_eq!(co2_calculate_emission(100.0, mode.as_ptr(), &mut kg), Co2Result::Success);
        assert_eq!(kg, 96.0);

        assert_eq!(co2_calculate_emission(-1.0, mode.as_ptr(), &mut kg), Co2Result::Abstained);
        let unknown = CString::new("rocket").unwrap();
        assert_eq!(
            co2_calculate_emission(1.0, unknown.as_ptr(), &mut kg),
            Co2Result::Abstained
        );
        assert_eq!(
            co2_calculate_emission(1.0, ptr::null(), &mut kg),
            Co2Result::InvalidParameter
        );
    }

    #[test]
    fn test_co2_credits_and_price() {
        let mut credits = 0.0;
        assert_eq!(co2_calculate_carbon_credits(1000.0, &mut credits), Co2Result::Success);
        assert_eq!(credits, 1.0);

        let mut price = Co2PriceEstimate::default();
        assert_eq!(co2_estimate_credit_price(2.0, &mut price), Co2Result::Success);
        assert_eq!((price.min, price.max, price.average), (100.0, 300.0, 200.0));
        assert_eq!(co2_estimate_credit_price(-2.0, &mut price), Co2Result::Abstained);
    }

    #[test]
    fn test_co2_find_distance() {
        let origin = CString::new("são paulo, sp").unwrap();
        let destination = CString::new("RIO DE JANEIRO, RJ").unwrap();
        let mut km = 0.0;
        assert_eq!(
            co2_find_distance(origin.as_ptr(), destination.as_ptr(), &mut km),
            Co2Result::Success
        );
        assert_eq!(km, 430.0);

        let nowhere = CString::new("Atlantis").unwrap();
        assert_eq!(
            co2_find_distance(origin.as_ptr(), nowhere.as_ptr(), &mut km),
            Co2Result::NotFound
        );
    }

    #[test]
    fn test_co2_list_cities_json() {
        let json_ptr = co2_list_cities_json();
        assert!(!json_ptr.is_null());
        let json = unsafe { CStr::from_ptr(json_ptr) }.to_str().unwrap();
        let cities: Vec<String> = serde_json::from_str(json).unwrap();
        assert!(cities.contains(&"Niterói, RJ".to_string()));
        co2_free_string(json_ptr);
    }

    #[test]
    fn test_co2_estimate_json() {
        let origin = CString::new("Recife, PE").unwrap();
        let destination = CString::new("Olinda, PE").unwrap();
        let mode = CString::new("bus").unwrap();
        let mut json_ptr: *mut c_char = ptr::null_mut();

        let result = co2_estimate_json(
            origin.as_ptr(),
            destination.as_ptr(),
            0.0,
            mode.as_ptr(),
            &mut json_ptr,
        );
        assert_eq!(result, Co2Result::Success);

        let json = unsafe { CStr::from_ptr(json_ptr) }.to_str().unwrap();
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(value["distanceKm"], 10.0);
        assert_eq!(value["emissionKg"], 0.89);
        co2_free_string(json_ptr);

        let plane = CString::new("plane").unwrap();
        let result = co2_estimate_json(
            origin.as_ptr(),
            destination.as_ptr(),
            0.0,
            plane.as_ptr(),
            &mut json_ptr,
        );
        assert_eq!(result, Co2Result::NotFound);
    }

    #[test]
    fn test_co2_init() {
        assert_eq!(co2_init(), Co2Result::Success);
    }
}
