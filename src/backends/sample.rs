use crate::models::{Listing, PropertyType, TransactionType};

const IMG_MARINE_DRIVE: &str = "https://images.unsplash.com/photo-1567226475328-9d6baaf565cf?auto=format&fit=crop&w=1170&q=80";
const IMG_GREATER_KAILASH: &str = "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?auto=format&fit=crop&w=1170&q=80";
const IMG_KORAMANGALA: &str = "https://images.unsplash.com/photo-1580587771525-78b9dba3b914?auto=format&fit=crop&w=1074&q=80";

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    city: &str,
    state: &str,
    locality: &str,
    property_type: PropertyType,
    bedrooms: u32,
    bathrooms: u32,
    area: u32,
    price: u64,
    description: &str,
) -> Listing {
    Listing {
        id: id.to_string(),
        price,
        address: format!("{}, {}", locality, city),
        city: city.to_string(),
        state: state.to_string(),
        bedrooms,
        bathrooms,
        area,
        property_type,
        description: description.to_string(),
        image: String::new(),
        locality: Some(locality.to_string()),
        amenities: Vec::new(),
        transaction_type: None,
    }
}

/// Sample listings used by the in-memory backend and as the default bulk-load set
pub fn sample_listings() -> Vec<Listing> {
    vec![
        Listing {
            address: "123, Marine Drive, Mumbai".to_string(),
            image: IMG_MARINE_DRIVE.to_string(),
            amenities: vec!["sea view".to_string(), "parking".to_string()],
            transaction_type: Some(TransactionType::Sale),
            ..listing(
                "1",
                "Mumbai",
                "Maharashtra",
                "Marine Drive",
                PropertyType::Apartment,
                2,
                2,
                1100,
                15_000_000,
                "A beautiful 2BHK apartment with a sea view.",
            )
        },
        Listing {
            address: "456, Greater Kailash, Delhi".to_string(),
            image: IMG_GREATER_KAILASH.to_string(),
            amenities: vec!["garden".to_string(), "parking".to_string()],
            transaction_type: Some(TransactionType::Sale),
            ..listing(
                "2",
                "Delhi",
                "Delhi",
                "Greater Kailash",
                PropertyType::House,
                4,
                3,
                2800,
                30_000_000,
                "A spacious 4BHK house with a garden.",
            )
        },
        Listing {
            address: "789, Koramangala, Bangalore".to_string(),
            image: IMG_KORAMANGALA.to_string(),
            amenities: vec!["gym".to_string(), "parking".to_string(), "clubhouse".to_string()],
            transaction_type: Some(TransactionType::Sale),
            ..listing(
                "3",
                "Bangalore",
                "Karnataka",
                "Koramangala",
                PropertyType::Condo,
                3,
                3,
                1650,
                20_000_000,
                "A modern 3BHK condo with all amenities.",
            )
        },
        Listing {
            amenities: vec!["private pool".to_string(), "garden".to_string()],
            transaction_type: Some(TransactionType::Sale),
            ..listing(
                "4",
                "Goa",
                "Goa",
                "Candolim",
                PropertyType::Villa,
                4,
                5,
                4200,
                95_000_000,
                "Portuguese-style villa with a private pool, minutes from the beach.",
            )
        },
        Listing {
            amenities: vec!["parking".to_string(), "power backup".to_string()],
            transaction_type: Some(TransactionType::Rent),
            ..listing(
                "5",
                "Chennai",
                "Tamil Nadu",
                "Anna Salai",
                PropertyType::Commercial,
                0,
                2,
                3500,
                250_000,
                "Ground-floor showroom space on Anna Salai, available on monthly rent.",
            )
        },
        Listing {
            amenities: vec!["gated community".to_string(), "parking".to_string()],
            transaction_type: Some(TransactionType::Sale),
            ..listing(
                "6",
                "Pune",
                "Maharashtra",
                "Koregaon Park",
                PropertyType::Apartment,
                2,
                2,
                1050,
                9_500_000,
                "Bright 2BHK in a gated community near the Koregaon Park lanes.",
            )
        },
        Listing {
            amenities: vec!["gated community".to_string(), "swimming pool".to_string()],
            transaction_type: Some(TransactionType::Sale),
            ..listing(
                "7",
                "Bangalore",
                "Karnataka",
                "Whitefield",
                PropertyType::Apartment,
                3,
                2,
                1450,
                18_500_000,
                "3BHK apartment with a shared swimming pool, close to the ITPL tech parks.",
            )
        },
        // No transaction type: the price marks it as a monthly rental
        listing(
            "8",
            "Pune",
            "Maharashtra",
            "Baner",
            PropertyType::Apartment,
            1,
            1,
            600,
            8_500,
            "Furnished 1BHK for working professionals.",
        ),
        Listing {
            transaction_type: Some(TransactionType::Sale),
            ..listing(
                "9",
                "Hyderabad",
                "Telangana",
                "Gachibowli",
                PropertyType::Plot,
                0,
                0,
                2400,
                12_000_000,
                "Residential plot with clear title in a HMDA approved layout.",
            )
        },
    ]
}
