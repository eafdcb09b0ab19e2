use std::fmt;
use std::sync::LazyLock;

use fxhash::FxHashMap;

macro_rules! symbols {
    (
        keywords { $($kw:ident => $kw_text:literal,)* }
        punctuation { $($punct:ident => $punct_text:literal,)* }
        operators { $($op:ident => $op_text:literal,)* }
        classes { $($class:ident => $class_name:literal,)* }
    ) => {
        /// Every terminal the tokenizer can produce.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum SymbolKind {
            $($kw,)*
            $($punct,)*
            $($op,)*
            $($class,)*
        }

        impl SymbolKind {
            pub const KEYWORDS: &'static [(&'static str, Self)] = &[$(($kw_text, Self::$kw),)*];

            /// Punctuation and operators together, in declaration order.
            pub const OPERATORS: &'static [(&'static str, Self)] = &[
                $(($punct_text, Self::$punct),)*
                $(($op_text, Self::$op),)*
            ];

            /// The exact source text of keywords, punctuation and operators.
            pub const fn fixed_text(self) -> Option<&'static str> {
                match self {
                    $(Self::$kw => Some($kw_text),)*
                    $(Self::$punct => Some($punct_text),)*
                    $(Self::$op => Some($op_text),)*
                    $(Self::$class => None,)*
                }
            }

            pub const fn is_keyword(self) -> bool {
                matches!(self, $(Self::$kw)|*)
            }

            pub const fn is_punctuation(self) -> bool {
                matches!(self, $(Self::$punct)|*)
            }

            pub const fn is_operator(self) -> bool {
                matches!(self, $(Self::$op)|*)
            }

            const fn class_name(self) -> &'static str {
                match self {
                    $(Self::$class => $class_name,)*
                    _ => "symbol",
                }
            }
        }
    };
}

symbols! {
    keywords {
        Abstract => "abstract",
        Assert => "assert",
        Boolean => "boolean",
        Break => "break",
        Byte => "byte",
        Case => "case",
        Catch => "catch",
        Char => "char",
        Class => "class",
        Const => "const",
        Continue => "continue",
        Default => "default",
        Do => "do",
        Double => "double",
        Else => "else",
        Enum => "enum",
        Extends => "extends",
        Final => "final",
        Finally => "finally",
        Float => "float",
        For => "for",
        Goto => "goto",
        If => "if",
        Implements => "implements",
        Import => "import",
        Instanceof => "instanceof",
        Int => "int",
        Interface => "interface",
        Long => "long",
        Native => "native",
        New => "new",
        Package => "package",
        Private => "private",
        Protected => "protected",
        Public => "public",
        Return => "return",
        Short => "short",
        Static => "static",
        Strictfp => "strictfp",
        Super => "super",
        Switch => "switch",
        Synchronized => "synchronized",
        This => "this",
        Throw => "throw",
        Throws => "throws",
        Transient => "transient",
        Try => "try",
        Void => "void",
        Volatile => "volatile",
        While => "while",
    }
    punctuation {
        LParen => "(",
        RParen => ")",
        LBrace => "{",
        RBrace => "}",
        LBracket => "[",
        RBracket => "]",
        Semicolon => ";",
        Comma => ",",
        Dot => ".",
        Ellipsis => "...",
        ColonColon => "::",
    }
    operators {
        Assign => "=",
        Gt => ">",
        Lt => "<",
        Bang => "!",
        Tilde => "~",
        Question => "?",
        Colon => ":",
        Arrow => "->",
        EqEq => "==",
        LtEq => "<=",
        GtEq => ">=",
        NotEq => "!=",
        AndAnd => "&&",
        OrOr => "||",
        PlusPlus => "++",
        MinusMinus => "--",
        Plus => "+",
        Minus => "-",
        Star => "*",
        Slash => "/",
        Amp => "&",
        Pipe => "|",
        Caret => "^",
        Percent => "%",
        Shl => "<<",
        Shr => ">>",
        UShr => ">>>",
        PlusAssign => "+=",
        MinusAssign => "-=",
        StarAssign => "*=",
        SlashAssign => "/=",
        AmpAssign => "&=",
        PipeAssign => "|=",
        CaretAssign => "^=",
        PercentAssign => "%=",
        ShlAssign => "<<=",
        ShrAssign => ">>=",
        UShrAssign => ">>>=",
    }
    classes {
        Identifier => "identifier",
        IntLiteral => "integer literal",
        LongLiteral => "long literal",
        FloatLiteral => "float literal",
        DoubleLiteral => "double literal",
        CharLiteral => "character literal",
        StringLiteral => "string literal",
        BooleanLiteral => "boolean literal",
        NullLiteral => "null",
        EndOfInput => "end of input",
    }
}

static KEYWORD_TABLE: LazyLock<FxHashMap<&'static str, SymbolKind>> = LazyLock::new(|| {
    let mut table: FxHashMap<_, _> = SymbolKind::KEYWORDS.iter().copied().collect();

    table.insert("true", SymbolKind::BooleanLiteral);
    table.insert("false", SymbolKind::BooleanLiteral);
    table.insert("null", SymbolKind::NullLiteral);
    table
});

static OPERATOR_TABLE: LazyLock<FxHashMap<&'static str, SymbolKind>> =
    LazyLock::new(|| SymbolKind::OPERATORS.iter().copied().collect());

impl SymbolKind {
    /// Reserved word or literal word (`true`, `false`, `null`) spelled `word`.
    pub fn from_word(word: &str) -> Option<Self> {
        KEYWORD_TABLE.get(word).copied()
    }

    /// Punctuation or operator spelled exactly `text`.
    pub fn from_operator(text: &str) -> Option<Self> {
        OPERATOR_TABLE.get(text).copied()
    }

    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::IntLiteral
                | Self::LongLiteral
                | Self::FloatLiteral
                | Self::DoubleLiteral
                | Self::CharLiteral
                | Self::StringLiteral
                | Self::BooleanLiteral
                | Self::NullLiteral
        )
    }

    pub const fn is_primitive_type(self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::Byte
                | Self::Char
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
        )
    }

    /// Tokens whose text begins with `>`.
    pub const fn starts_with_gt(self) -> bool {
        matches!(
            self,
            Self::Gt | Self::GtEq | Self::Shr | Self::UShr | Self::ShrAssign | Self::UShrAssign
        )
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fixed_text() {
            Some(text) => write!(f, "`{text}`"),
            None => f.write_str(self.class_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_agree_with_fixed_text() {
        for (text, kind) in SymbolKind::KEYWORDS.iter().chain(SymbolKind::OPERATORS) {
            assert_eq!(kind.fixed_text(), Some(*text));
        }
    }

    #[test]
    fn test_word_lookup() {
        assert_eq!(SymbolKind::from_word("int"), Some(SymbolKind::Int));
        assert_eq!(SymbolKind::from_word("null"), Some(SymbolKind::NullLiteral));
        assert_eq!(SymbolKind::from_word("Int"), None);
        assert!(SymbolKind::Int.is_keyword());
        assert!(!SymbolKind::Identifier.is_keyword());
    }

    #[test]
    fn test_display() {
        assert_eq!(SymbolKind::UShr.to_string(), "`>>>`");
        assert_eq!(SymbolKind::Identifier.to_string(), "identifier");
        assert!(SymbolKind::Semicolon.is_punctuation());
        assert!(SymbolKind::Assign.is_operator());
    }
}
