use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::domain::Snapshot;
use crate::models::{Book, BookStatus, Member, MemberStatus, Transaction, TransactionStatus};

const COVER_BASE: &str = "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books";

struct SeedBook {
    id: &'static str,
    title: &'static str,
    author: &'static str,
    isbn: &'static str,
    year: i32,
    genre: &'static str,
    description: &'static str,
    cover: &'static str,
    status: BookStatus,
    location: &'static str,
}

const BOOKS: [SeedBook; 8] = [
    SeedBook {
        id: "b1",
        title: "The Lightning Thief",
        author: "Rick Riordan",
        isbn: "978-0786838653",
        year: 2005,
        genre: "Fantasy",
        description: "Percy Jackson discovers he's the son of Poseidon and must prevent a war between the Greek gods.",
        cover: "1400602609i/28187.jpg",
        status: BookStatus::Available,
        location: "Fiction - Row 3",
    },
    SeedBook {
        id: "b2",
        title: "To Kill a Mockingbird",
        author: "Harper Lee",
        isbn: "978-0061120084",
        year: 1960,
        genre: "Classic",
        description: "The story of young Scout Finch and her father's defense of a Black man accused of rape in 1930s Alabama.",
        cover: "1553383690i/2657.jpg",
        status: BookStatus::Available,
        location: "Fiction - Row 1",
    },
    SeedBook {
        id: "b3",
        title: "The Hobbit",
        author: "J.R.R. Tolkien",
        isbn: "978-0547928227",
        year: 1937,
        genre: "Fantasy",
        description: "Bilbo Baggins goes on an adventure with dwarves to reclaim their treasure from a dragon.",
        cover: "1546071216i/5907.jpg",
        status: BookStatus::CheckedOut,
        location: "Fiction - Row 2",
    },
    SeedBook {
        id: "b4",
        title: "1984",
        author: "George Orwell",
        isbn: "978-0451524935",
        year: 1949,
        genre: "Dystopian",
        description: "A chilling portrayal of a totalitarian society and one man's rebellion against it.",
        cover: "1657781256i/61439040.jpg",
        status: BookStatus::Available,
        location: "Fiction - Row 1",
    },
    SeedBook {
        id: "b5",
        title: "A Brief History of Time",
        author: "Stephen Hawking",
        isbn: "978-0553380163",
        year: 1988,
        genre: "Science",
        description: "Hawking explains complex concepts of space and time in accessible language.",
        cover: "1333578746i/3869.jpg",
        status: BookStatus::Available,
        location: "Non-Fiction - Row 5",
    },
    SeedBook {
        id: "b6",
        title: "Dune",
        author: "Frank Herbert",
        isbn: "978-0441172719",
        year: 1965,
        genre: "Science Fiction",
        description: "An epic adventure on the desert planet Arrakis, where water is scarce and giant sandworms roam.",
        cover: "1555447414i/44767458.jpg",
        status: BookStatus::Available,
        location: "Fiction - Row 4",
    },
    SeedBook {
        id: "b7",
        title: "Becoming",
        author: "Michelle Obama",
        isbn: "978-1524763138",
        year: 2018,
        genre: "Biography",
        description: "The memoir of former First Lady Michelle Obama, detailing her life journey.",
        cover: "1528206996i/38746485.jpg",
        status: BookStatus::CheckedOut,
        location: "Non-Fiction - Row 2",
    },
    SeedBook {
        id: "b8",
        title: "The Alchemist",
        author: "Paulo Coelho",
        isbn: "978-0062315007",
        year: 1988,
        genre: "Fiction",
        description: "A shepherd boy's journey to find a worldly treasure leads him to discover the treasure within.",
        cover: "1654371463i/18144590.jpg",
        status: BookStatus::Available,
        location: "Fiction - Row 3",
    },
];

/// The demo catalog: eight books, four members and three loans
pub fn sample_snapshot() -> Snapshot {
    Snapshot::new(sample_books(), sample_members(), sample_transactions())
}

pub fn sample_books() -> Vec<Book> {
    BOOKS
        .iter()
        .map(|b| Book {
            id: b.id.to_string(),
            title: b.title.to_string(),
            author: b.author.to_string(),
            isbn: b.isbn.to_string(),
            published_year: b.year,
            genre: b.genre.to_string(),
            description: b.description.to_string(),
            cover_image: format!("{}/{}", COVER_BASE, b.cover),
            status: b.status,
            location: Some(b.location.to_string()),
        })
        .collect()
}

pub fn sample_members() -> Vec<Member> {
    [
        ("m1", "John Doe", "john.doe@example.com", "555-123-4567", (2022, 1, 15), MemberStatus::Active),
        ("m2", "Jane Smith", "jane.smith@example.com", "555-987-6543", (2021, 11, 3), MemberStatus::Active),
        ("m3", "Michael Johnson", "michael.j@example.com", "555-555-5555", (2022, 3, 22), MemberStatus::Active),
        ("m4", "Emily Davis", "emily.davis@example.com", "555-222-3333", (2022, 5, 10), MemberStatus::Inactive),
    ]
    .into_iter()
    .map(|(id, name, email, phone, (y, m, d), status)| Member {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: Some(phone.to_string()),
        member_since: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        status,
    })
    .collect()
}

pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "tr1".to_string(),
            book_id: "b3".to_string(),
            member_id: "m1".to_string(),
            checkout_date: day(2023, 3, 15),
            due_date: day(2023, 3, 29),
            return_date: None,
            status: TransactionStatus::Active,
        },
        Transaction {
            id: "tr2".to_string(),
            book_id: "b7".to_string(),
            member_id: "m3".to_string(),
            checkout_date: day(2023, 3, 10),
            due_date: day(2023, 3, 24),
            return_date: None,
            status: TransactionStatus::Active,
        },
        Transaction {
            id: "tr3".to_string(),
            book_id: "b5".to_string(),
            member_id: "m2".to_string(),
            checkout_date: day(2023, 2, 28),
            due_date: day(2023, 3, 14),
            return_date: Some(day(2023, 3, 12)),
            status: TransactionStatus::Completed,
        },
    ]
}

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}
