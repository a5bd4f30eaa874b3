use std::slice;

use crate::CommandToken;

/// An ordered list of command tokens.
///
/// Insertion order is execution order and duplicates are allowed. A program
/// is only runnable when it holds at least one token other than
/// [`CommandToken::None`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    tokens: Vec<CommandToken>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: CommandToken) {
        self.tokens.push(token);
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    pub fn tokens(&self) -> &[CommandToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_runnable(&self) -> bool {
        self.tokens.iter().any(|&token| token != CommandToken::None)
    }

    pub fn iter(&self) -> slice::Iter<'_, CommandToken> {
        self.tokens.iter()
    }
}

impl Extend<CommandToken> for Program {
    fn extend<I: IntoIterator<Item = CommandToken>>(&mut self, iter: I) {
        self.tokens.extend(iter);
    }
}

impl FromIterator<CommandToken> for Program {
    fn from_iter<I: IntoIterator<Item = CommandToken>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl<'p> IntoIterator for &'p Program {
    type Item = &'p CommandToken;
    type IntoIter = slice::Iter<'p, CommandToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
