use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use brl_types::{AuthorId, AuthorName, BookId, BookSummary, GenreId, NewBook, Price};

use crate::error::{CatalogError, CatalogResult};
use crate::filter::BookFilter;
use crate::traits::{CatalogReader, CatalogWriter};

/// In-memory catalog implementation for tests, local demos, and embedding.
///
/// All rows live in maps behind a single `RwLock`; holding the write guard
/// for the whole of `add_book` gives the multi-statement insertion the same
/// atomicity a transaction provides against a relational backend.
pub struct InMemoryCatalog {
    inner: RwLock<CatalogState>,
}

#[derive(Default)]
struct CatalogState {
    next_author_id: i64,
    next_genre_id: i64,
    next_book_id: i64,
    authors: BTreeMap<AuthorId, AuthorRow>,
    genres: BTreeMap<GenreId, String>,
    books: BTreeMap<BookId, BookRow>,
    book_genres: BTreeSet<(BookId, GenreId)>,
}

struct AuthorRow {
    name: AuthorName,
    avatar: Option<Vec<u8>>,
}

struct BookRow {
    title: String,
    price: Price,
    pages: u16,
    author_id: AuthorId,
}

impl CatalogState {
    fn resolve_or_create_author(&mut self, name: &AuthorName, avatar: Option<&[u8]>) -> AuthorId {
        if let Some((id, _)) = self.authors.iter().find(|(_, row)| &row.name == name) {
            return *id;
        }
        self.next_author_id += 1;
        let id = AuthorId::new(self.next_author_id);
        self.authors.insert(
            id,
            AuthorRow {
                name: name.clone(),
                avatar: avatar.map(<[u8]>::to_vec),
            },
        );
        tracing::debug!(author = %id, first = %name.first, last = %name.last, "author created");
        id
    }

    fn resolve_or_create_genre(&mut self, name: &str) -> GenreId {
        if let Some((id, _)) = self.genres.iter().find(|(_, n)| n.as_str() == name) {
            return *id;
        }
        self.next_genre_id += 1;
        let id = GenreId::new(self.next_genre_id);
        self.genres.insert(id, name.to_string());
        tracing::debug!(genre = %id, name, "genre created");
        id
    }

    fn genre_names(&self, book_id: BookId) -> Vec<String> {
        self.book_genres
            .range((book_id, GenreId::new(i64::MIN))..=(book_id, GenreId::new(i64::MAX)))
            .filter_map(|(_, genre_id)| self.genres.get(genre_id).cloned())
            .collect()
    }

    fn summary(&self, book: &BookRow) -> CatalogResult<BookSummary> {
        let author = self
            .authors
            .get(&book.author_id)
            .ok_or_else(|| CatalogError::Store {
                op: "filter_books",
                reason: format!("author {} referenced by {:?} is missing", book.author_id, book.title),
            })?;
        Ok(BookSummary {
            title: book.title.clone(),
            price: book.price,
            pages: book.pages,
            author_first: author.name.first.clone(),
            author_last: author.name.last.clone(),
        })
    }
}

impl InMemoryCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CatalogState::default()),
        }
    }

    /// Number of book rows currently stored.
    pub fn book_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").books.len()
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogWriter for InMemoryCatalog {
    fn resolve_or_create_author(
        &self,
        name: &AuthorName,
        avatar: Option<&[u8]>,
    ) -> CatalogResult<AuthorId> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| CatalogError::poisoned("resolve_or_create_author"))?;
        Ok(state.resolve_or_create_author(name, avatar))
    }

    fn resolve_or_create_genre(&self, name: &str) -> CatalogResult<GenreId> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| CatalogError::poisoned("resolve_or_create_genre"))?;
        Ok(state.resolve_or_create_genre(name))
    }

    fn add_book(&self, book: &NewBook) -> CatalogResult<BookId> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| CatalogError::poisoned("add_book"))?;

        // Resolution happens before the uniqueness check, matching the
        // statement order a transactional backend would execute. Rows minted
        // here survive a duplicate-title failure and are reused on retry.
        let author_id = state.resolve_or_create_author(&book.author, book.avatar.as_deref());
        let genre_ids: Vec<GenreId> = book
            .genres
            .iter()
            .map(|name| state.resolve_or_create_genre(name))
            .collect();

        if state.books.values().any(|row| row.title == book.title) {
            return Err(CatalogError::DuplicateTitle {
                title: book.title.clone(),
            });
        }

        state.next_book_id += 1;
        let book_id = BookId::new(state.next_book_id);
        state.books.insert(
            book_id,
            BookRow {
                title: book.title.clone(),
                price: book.price,
                pages: book.pages,
                author_id,
            },
        );
        for genre_id in genre_ids {
            state.book_genres.insert((book_id, genre_id));
        }

        tracing::debug!(book = %book_id, title = %book.title, "book added");
        Ok(book_id)
    }

    fn remove_book(&self, book_id: BookId) -> CatalogResult<()> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| CatalogError::poisoned("remove_book"))?;

        // Join rows first, then the book row, as the schema's FK order requires.
        state.book_genres.retain(|(b, _)| *b != book_id);
        if state.books.remove(&book_id).is_none() {
            return Err(CatalogError::BookNotFound { book_id });
        }

        tracing::debug!(book = %book_id, "book removed");
        Ok(())
    }
}

impl CatalogReader for InMemoryCatalog {
    fn filter_books(&self, filter: &BookFilter) -> CatalogResult<BTreeMap<BookId, BookSummary>> {
        let state = self
            .inner
            .read()
            .map_err(|_| CatalogError::poisoned("filter_books"))?;

        let mut matches = BTreeMap::new();
        for (id, row) in &state.books {
            let genres = state.genre_names(*id);
            // The read path is a join over book_genres: a book with no
            // association never appears, whatever the filter says.
            if genres.is_empty() {
                continue;
            }
            let summary = state.summary(row)?;
            if filter.accepts(&summary, &genres) {
                matches.insert(*id, summary);
            }
        }
        Ok(matches)
    }

    fn genres_of_book(&self, book_id: BookId) -> CatalogResult<Vec<String>> {
        let state = self
            .inner
            .read()
            .map_err(|_| CatalogError::poisoned("genres_of_book"))?;

        let mut names = state.genre_names(book_id);
        names.sort();
        Ok(names)
    }

    fn book_exists(&self, book_id: BookId) -> CatalogResult<bool> {
        let state = self
            .inner
            .read()
            .map_err(|_| CatalogError::poisoned("book_exists"))?;
        Ok(state.books.contains_key(&book_id))
    }
}

impl std::fmt::Debug for InMemoryCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCatalog")
            .field("book_count", &self.book_count())
            .finish()
    }
}
