use crate::engine::types::Square;

/// マスの集合（ビット i がインデックス i のマスに対応する）。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    /// 空集合。
    pub const EMPTY: Self = Self(u64::MIN);

    /// ビットボードから生成する。
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// ビットボードを返す。
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// 要素を追加する。
    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= square.bit();
    }

    /// 要素を含むかどうか。
    #[inline]
    #[must_use]
    pub fn contains(self, square: Square) -> bool {
        self.0 & square.bit() != u64::MIN
    }

    /// 空集合かどうか。
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == u64::MIN
    }

    /// 要素数。
    #[inline]
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// 和集合。
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// インデックスの昇順で要素を列挙する。
    #[inline]
    #[must_use]
    pub const fn iter(self) -> Iter {
        Iter { bits: self.0 }
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = Iter;

    #[inline]
    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl FromIterator<Square> for SquareSet {
    #[inline]
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for square in iter {
            set.insert(square);
        }
        set
    }
}

/// `SquareSet` の要素を昇順に返すイテレータ。
#[derive(Copy, Clone, Debug)]
pub struct Iter {
    /// 未列挙のビット。
    bits: u64,
}

impl Iterator for Iter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.bits == u64::MIN {
            return None;
        }

        let index = u8::try_from(self.bits.trailing_zeros()).ok()?;
        self.bits &= self.bits.wrapping_sub(1);
        Some(Square::from_index_unchecked(index))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = usize::try_from(self.bits.count_ones()).unwrap_or(usize::MAX);
        (count, Some(count))
    }
}
