use crate::{ItemCatalog, StoredStack};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Quantity,
    DisplayName,
    /// Source mod first, then display name
    Namespace,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// One search term. A query matches a stack only if every token matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryToken {
    /// Case-insensitive substring of the item's namespace
    Namespace(String),
    /// Case-insensitive substring of any catalog tag on the item
    Tag(String),
    /// Case-insensitive substring of any tooltip line
    Text(String),
}

impl QueryToken {
    pub fn matches(&self, stack: &StoredStack, catalog: &dyn ItemCatalog) -> bool {
        match self {
            QueryToken::Namespace(needle) => contains_ignore_case(stack.kind.namespace(), needle),
            QueryToken::Tag(needle) => catalog
                .tags(stack.kind.id())
                .iter()
                .any(|tag| contains_ignore_case(tag, needle)),
            QueryToken::Text(needle) => catalog
                .tooltip(&stack.kind)
                .iter()
                .any(|line| contains_ignore_case(line, needle)),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Sort and filter settings for listing a network's contents
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackQuery {
    pub sort: SortKey,
    pub direction: SortDirection,
    pub tokens: Vec<QueryToken>,
}

impl StackQuery {
    pub fn new(sort: SortKey, direction: SortDirection) -> Self {
        Self {
            sort,
            direction,
            tokens: Vec::new(),
        }
    }

    pub fn token(mut self, token: QueryToken) -> Self {
        self.tokens.push(token);
        self
    }

    pub fn matches(&self, stack: &StoredStack, catalog: &dyn ItemCatalog) -> bool {
        self.tokens.iter().all(|token| token.matches(stack, catalog))
    }

    /// Filters and sorts `stacks` in place. The sort is stable, so equal
    /// entries keep the order they were given in.
    pub fn apply(&self, stacks: &mut Vec<StoredStack>, catalog: &dyn ItemCatalog) {
        stacks.retain(|stack| self.matches(stack, catalog));

        let mut keyed: Vec<(SortValue, StoredStack)> = stacks
            .drain(..)
            .map(|stack| (SortValue::new(self.sort, &stack, catalog), stack))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| {
            let ordering = a.cmp(b);
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        stacks.extend(keyed.into_iter().map(|(_, stack)| stack));
    }
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Quantity(u64),
    Name(String),
    Namespace(String, String),
}

impl SortValue {
    fn new(sort: SortKey, stack: &StoredStack, catalog: &dyn ItemCatalog) -> Self {
        match sort {
            SortKey::Quantity => SortValue::Quantity(stack.quantity),
            SortKey::DisplayName => {
                SortValue::Name(stack.kind.display_name(catalog).to_lowercase())
            }
            SortKey::Namespace => SortValue::Namespace(
                stack.kind.namespace().to_string(),
                stack.kind.display_name(catalog).to_lowercase(),
            ),
        }
    }
}
