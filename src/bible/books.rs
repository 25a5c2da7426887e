//! Canonical book table and book-name resolution.
//!
//! Resolution is strict: a token must equal a book's full name or one of
//! its aliases exactly. Prefix matching is not attempted because short
//! prefixes are shared between books (`사` / `사도`, `요` / `요한1서`).

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::types::{BookId, Testament};

/// Static description of one canonical book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookDescriptor {
    /// Stable short identifier.
    pub id: &'static str,
    /// Full Korean name.
    pub name: &'static str,
    /// Accepted abbreviations and alternate names.
    pub aliases: &'static [&'static str],
    /// Number of chapters in the book.
    pub chapter_count: u32,
    /// Old or New Testament.
    pub testament: Testament,
}

impl BookDescriptor {
    /// Identifier as an owned `BookId`.
    pub fn book_id(&self) -> BookId {
        BookId::new(self.id)
    }

    /// Whether `chapter` exists in this book.
    pub const fn has_chapter(&self, chapter: u32) -> bool {
        chapter >= 1 && chapter <= self.chapter_count
    }
}

const fn ot(
    id: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
    chapter_count: u32,
) -> BookDescriptor {
    BookDescriptor { id, name, aliases, chapter_count, testament: Testament::Old }
}

const fn nt(
    id: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
    chapter_count: u32,
) -> BookDescriptor {
    BookDescriptor { id, name, aliases, chapter_count, testament: Testament::New }
}

/// All 66 books, Old Testament first, each testament in canonical order.
static BOOKS: [BookDescriptor; 66] = [
    ot("GEN", "창세기", &["창", "창세"], 50),
    ot("EXO", "출애굽기", &["출", "출애"], 40),
    ot("LEV", "레위기", &["레", "레위"], 27),
    ot("NUM", "민수기", &["민", "민수"], 36),
    ot("DEU", "신명기", &["신", "신명"], 34),
    ot("JOS", "여호수아", &["수", "여호수아"], 24),
    ot("JDG", "사사기", &["삿", "사사"], 21),
    ot("RUT", "룻기", &["룻"], 4),
    ot("1SA", "사무엘상", &["삼상", "사무엘상"], 31),
    ot("2SA", "사무엘하", &["삼하", "사무엘하"], 24),
    ot("1KI", "열왕기상", &["왕상", "열왕상"], 22),
    ot("2KI", "열왕기하", &["왕하", "열왕하"], 25),
    ot("1CH", "역대상", &["대상", "역대상"], 29),
    ot("2CH", "역대하", &["대하", "역대하"], 36),
    ot("EZR", "에스라", &["스", "에스라"], 10),
    ot("NEH", "느헤미야", &["느", "느헤미야"], 13),
    ot("EST", "에스더", &["에", "에스더"], 10),
    ot("JOB", "욥기", &["욥"], 42),
    ot("PSA", "시편", &["시"], 150),
    ot("PRO", "잠언", &["잠"], 31),
    ot("ECC", "전도서", &["전", "전도"], 12),
    ot("SNG", "아가", &["아"], 8),
    ot("ISA", "이사야", &["사", "이사야"], 66),
    ot("JER", "예레미야", &["렘", "예레미야"], 52),
    ot("LAM", "예레미야애가", &["애", "애가"], 5),
    ot("EZK", "에스겔", &["겔", "에스겔"], 48),
    ot("DAN", "다니엘", &["단", "다니엘"], 12),
    ot("HOS", "호세아", &["호", "호세아"], 14),
    ot("JOL", "요엘", &["욜", "요엘"], 3),
    ot("AMO", "아모스", &["암", "아모스"], 9),
    ot("OBA", "오바댜", &["옵", "오바댜"], 1),
    ot("JON", "요나", &["욘", "요나"], 4),
    ot("MIC", "미가", &["미", "미가"], 7),
    ot("NAH", "나훔", &["나", "나훔"], 3),
    ot("HAB", "하박국", &["합", "하박국"], 3),
    ot("ZEP", "스바냐", &["습", "스바냐"], 3),
    ot("HAG", "학개", &["학", "학개"], 2),
    ot("ZEC", "스가랴", &["슥", "스가랴"], 14),
    ot("MAL", "말라기", &["말", "말라기"], 4),
    nt("MAT", "마태복음", &["마", "마태"], 28),
    nt("MRK", "마가복음", &["막", "마가"], 16),
    nt("LUK", "누가복음", &["눅", "누가"], 24),
    nt("JHN", "요한복음", &["요", "요한"], 21),
    nt("ACT", "사도행전", &["행", "사도"], 28),
    nt("ROM", "로마서", &["롬", "로마"], 16),
    nt("CO1", "고린도전서", &["고전", "고린도전"], 16),
    nt("CO2", "고린도후서", &["고후", "고린도후"], 13),
    nt("GAL", "갈라디아서", &["갈", "갈라", "갈라디아"], 6),
    nt("EPH", "에베소서", &["엡", "에베소"], 6),
    nt("PHP", "빌립보서", &["빌", "빌립보"], 4),
    nt("COL", "골로새서", &["골", "골로새"], 4),
    nt("TH1", "데살로니가전서", &["살전", "데살로니가전"], 5),
    nt("TH2", "데살로니가후서", &["살후", "데살로니가후"], 3),
    nt("TI1", "디모데전서", &["딤전", "디모데전"], 6),
    nt("TI2", "디모데후서", &["딤후", "디모데후"], 4),
    nt("TIT", "디도서", &["딛", "디도"], 3),
    nt("PHM", "빌레몬서", &["몬", "빌레몬"], 1),
    nt("HEB", "히브리서", &["히", "히브리"], 13),
    nt("JAS", "야고보서", &["약", "야고보"], 5),
    nt("PE1", "베드로전서", &["벧전", "베드로전"], 5),
    nt("PE2", "베드로후서", &["벧후", "베드로후"], 3),
    nt("JO1", "요한일서", &["요일", "요한1서"], 5),
    nt("JO2", "요한이서", &["요이", "요한2서"], 1),
    nt("JO3", "요한삼서", &["요삼", "요한3서"], 1),
    nt("JUD", "유다서", &["유", "유다"], 1),
    nt("REV", "요한계시록", &["계", "계시", "계시록"], 22),
];

lazy_static! {
    static ref BY_NAME: HashMap<&'static str, &'static BookDescriptor> =
        BOOKS.iter().map(|b| (b.name, b)).collect();

    static ref BY_ALIAS: HashMap<&'static str, &'static BookDescriptor> = BOOKS
        .iter()
        .flat_map(|b| b.aliases.iter().map(move |alias| (*alias, b)))
        .collect();

    static ref BY_ID: HashMap<&'static str, &'static BookDescriptor> =
        BOOKS.iter().map(|b| (b.id, b)).collect();
}

/// All canonical books in canonical order.
pub fn books() -> &'static [BookDescriptor] {
    &BOOKS
}

/// Old Testament books in canonical order.
pub fn old_testament() -> impl Iterator<Item = &'static BookDescriptor> {
    BOOKS.iter().filter(|b| b.testament == Testament::Old)
}

/// New Testament books in canonical order.
pub fn new_testament() -> impl Iterator<Item = &'static BookDescriptor> {
    BOOKS.iter().filter(|b| b.testament == Testament::New)
}

/// Look up a book by its identifier.
pub fn book_info(id: &str) -> Option<&'static BookDescriptor> {
    BY_ID.get(id).copied()
}

/// Resolve free-form user text to a book.
///
/// Full names are tried before aliases. Returns `None` when neither matches
/// exactly; callers treat that as "leave the text alone".
pub fn resolve_book(input: &str) -> Option<&'static BookDescriptor> {
    let normalized = input.trim();

    BY_NAME
        .get(normalized)
        .or_else(|| BY_ALIAS.get(normalized))
        .copied()
}

/// Resolve free-form user text to a book identifier.
pub fn resolve_book_id(input: &str) -> Option<BookId> {
    resolve_book(input).map(BookDescriptor::book_id)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_has_66_books_split_39_27() {
        assert_eq!(books().len(), 66);
        assert_eq!(old_testament().count(), 39);
        assert_eq!(new_testament().count(), 27);
        assert_eq!(books()[0].id, "GEN");
        assert_eq!(books()[38].id, "MAL");
        assert_eq!(books()[39].id, "MAT");
        assert_eq!(books()[65].id, "REV");
    }

    #[test]
    fn old_testament_precedes_new() {
        let first_new = books().iter().position(|b| b.testament == Testament::New).unwrap();
        assert!(books()[first_new..].iter().all(|b| b.testament == Testament::New));
    }

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<_> = books().iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), books().len());
    }

    #[test]
    fn no_name_or_alias_shared_between_books() {
        let mut owner: HashMap<&str, &str> = HashMap::new();
        for book in books() {
            let labels: HashSet<&str> =
                std::iter::once(book.name).chain(book.aliases.iter().copied()).collect();
            for label in labels {
                if let Some(other) = owner.insert(label, book.id) {
                    panic!("{label} is claimed by both {other} and {}", book.id);
                }
            }
        }
    }

    #[test]
    fn every_name_and_alias_resolves_to_its_book() {
        for book in books() {
            assert_eq!(resolve_book_id(book.name).unwrap(), book.id);
            for alias in book.aliases {
                assert_eq!(resolve_book_id(alias).unwrap(), book.id, "alias {alias}");
            }
        }
    }

    #[test]
    fn resolution_trims_whitespace() {
        assert_eq!(resolve_book_id("  창  "), resolve_book_id("창"));
        assert_eq!(resolve_book_id("창").unwrap(), "GEN");
        assert_eq!(resolve_book_id("창세").unwrap(), "GEN");
    }

    #[test]
    fn unknown_and_partial_names_do_not_resolve() {
        assert!(resolve_book_id("존재하지않음").is_none());
        // Prefixes of full names that are not aliases themselves.
        assert!(resolve_book_id("출애굽").is_none());
        assert!(resolve_book_id("요한계").is_none());
        assert!(resolve_book_id("").is_none());
    }

    #[test]
    fn short_aliases_pick_the_listed_book() {
        assert_eq!(resolve_book_id("사").unwrap(), "ISA");
        assert_eq!(resolve_book_id("사도").unwrap(), "ACT");
        assert_eq!(resolve_book_id("요").unwrap(), "JHN");
        assert_eq!(resolve_book_id("요일").unwrap(), "JO1");
    }

    #[test]
    fn book_info_by_id() {
        let psalms = book_info("PSA").unwrap();
        assert_eq!(psalms.name, "시편");
        assert_eq!(psalms.chapter_count, 150);
        assert!(psalms.has_chapter(150));
        assert!(!psalms.has_chapter(151));
        assert!(!psalms.has_chapter(0));
        assert!(book_info("XYZ").is_none());
    }
}
