/// Named resident used to populate an empty store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimalArchetype {
    pub name: &'static str,
    pub species: &'static str,
    pub photo_url: &'static str,
}

const fn archetype(
    name: &'static str,
    species: &'static str,
    photo_url: &'static str,
) -> AnimalArchetype {
    AnimalArchetype {
        name,
        species,
        photo_url,
    }
}

pub const RESIDENT_NOTES: &str = "Resident specimen under continuous monitoring.";

pub const ARCHETYPES: [AnimalArchetype; 15] = [
    archetype(
        "Kaiser",
        "African Lion",
        "https://images.unsplash.com/photo-1546182990-dffeafbe841d?w=800",
    ),
    archetype(
        "Kiara",
        "Lioness",
        "https://images.unsplash.com/photo-1614027129531-1f474818a7c2?w=800",
    ),
    archetype(
        "Shere Khan",
        "Bengal Tiger",
        "https://images.unsplash.com/photo-1561731216-c3a4d99437d5?w=800",
    ),
    archetype(
        "Dumbo",
        "African Elephant",
        "https://images.unsplash.com/photo-1557050543-4d5f4e07ef46?w=800",
    ),
    archetype(
        "Melman",
        "Reticulated Giraffe",
        "https://images.unsplash.com/photo-1526336028067-6484187f56b2?w=800",
    ),
    archetype(
        "Caesar",
        "Chimpanzee",
        "https://images.unsplash.com/photo-1540573133985-87b6da6d54a9?w=800",
    ),
    archetype(
        "Pabu",
        "Red Panda",
        "https://images.unsplash.com/photo-1544237526-cae15a57ed1e?w=800",
    ),
    archetype(
        "Rico",
        "American Flamingo",
        "https://images.unsplash.com/photo-1539418561314-565804e349c0?w=800",
    ),
    archetype(
        "George",
        "Galapagos Tortoise",
        "https://images.unsplash.com/photo-1516934024742-b461fba47600?w=800",
    ),
    archetype(
        "Frosty",
        "Snow Leopard",
        "https://images.unsplash.com/photo-1534188753412-3e26d0d618d6?w=800",
    ),
    archetype(
        "Marty",
        "Grant's Zebra",
        "https://images.unsplash.com/photo-1501705388883-4ed8a543392c?w=800",
    ),
    archetype(
        "Tank",
        "White Rhinoceros",
        "https://images.unsplash.com/photo-1534293230397-c067fc201ab8?w=800",
    ),
    archetype(
        "Kala",
        "Mountain Gorilla",
        "https://images.unsplash.com/photo-1591824438708-ce405f36dfaf?w=800",
    ),
    archetype(
        "Pascal",
        "Panther Chameleon",
        "https://images.unsplash.com/photo-1518531933037-91b2f5f229cc?w=800",
    ),
    archetype(
        "Nile",
        "Nile Crocodile",
        "https://images.unsplash.com/photo-1549366021-9f761d450615?w=800",
    ),
];

pub const LOCATIONS: [&str; 4] = [
    "Savanna Sector A",
    "Central Aviary",
    "Primate Pavilion",
    "North Reserve",
];

pub const EVALUATORS: [&str; 4] = ["Dr. Smith", "Dr. Garcia", "Keeper Martinez", "Vet. Roberts"];

pub const LEAD_ROLE: &str = "Head Veterinarian";
pub const FOLLOW_UP_ROLE: &str = "Senior Caretaker";
pub const VISIT_NOTES: &str = "Routine welfare protocol monitoring.";

pub const ADMIN_ACCOUNT: &str = "admin@welfare.local";
pub const CARETAKER_ACCOUNT: &str = "caretaker@welfare.local";
