use crate::models::Listing;

/// Rupee amount with Indian digit grouping: 15000000 -> "₹1,50,00,000"
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("₹{},{}", groups.join(","), tail)
}

/// Multi-line text card for one listing
pub fn render_card(index: usize, listing: &Listing) -> String {
    let suffix = if listing.is_for_rent() { "/month" } else { "" };
    let mut out = format!(
        "{}. {}{} · {}\n   {}\n   {}, {}\n   {} beds · {} baths · {} sqft",
        index,
        format_inr(listing.price),
        suffix,
        listing.property_type,
        listing.address,
        listing.city,
        listing.state,
        listing.bedrooms,
        listing.bathrooms,
        listing.area,
    );
    if !listing.amenities.is_empty() {
        out.push_str(&format!("\n   Amenities: {}", listing.amenities.join(", ")));
    }
    if !listing.description.is_empty() {
        out.push_str(&format!("\n   {}", listing.description));
    }
    out.push_str(&format!("\n   ID: {}", listing.id));
    out
}
