//! Fixed reference catalogs (languages, specialisations, care types).

pub const LANGUAGES: &[&str] = &[
    "English",
    "French",
    "Spanish",
    "German",
    "Italian",
    "Portuguese",
    "Russian",
    "Chinese",
    "Japanese",
    "Arabic",
];

pub const SPECIALISATIONS: &[&str] = &[
    "Plumber",
    "Electrician",
    "Carpenter",
    "Painter",
    "Gardener",
    "Cleaner",
    "HVAC Technician",
    "Roofer",
    "Locksmith",
    "Handyman",
    "Interior Designer",
    "Landscaper",
    "Pool Maintenance",
    "Appliance Repair",
    "Flooring Specialist",
];

pub const CARE_TYPES: &[&str] = &[
    "Home Care",
    "Medical Care",
    "Companionship",
    "Meal Preparation",
    "Transportation",
    "Housekeeping",
    "Personal Care",
    "Medication Management",
    "Physical Therapy",
    "Nursing Care",
];
