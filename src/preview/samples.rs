use super::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Punctuation and identifiers drawn in `foreground.primary`.
    Plain,
    /// Whitespace between tokens.
    Space,
    Role(Role),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub text: &'static str,
    pub kind: TokenKind,
}

/// Background slot painted behind a whole line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineHighlight {
    Warning,
    Error,
}

impl LineHighlight {
    pub fn slot(self) -> &'static str {
        match self {
            Self::Warning => "warningLine",
            Self::Error => "errorLine",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleLine {
    /// Left padding in rem.
    pub indent: u8,
    pub highlight: Option<LineHighlight>,
    pub separator: bool,
    pub spaced: bool,
    pub tokens: &'static [Token],
}

const fn line(indent: u8, tokens: &'static [Token]) -> SampleLine {
    SampleLine {
        indent,
        highlight: None,
        separator: false,
        spaced: false,
        tokens,
    }
}

const BLANK: SampleLine = line(0, &[]);

/// A `&'static [Token]` built in a const item so it outlives the static.
macro_rules! tokens {
    ($($token:expr),* $(,)?) => {{
        const TOKENS: &[Token] = &[$($token),*];
        TOKENS
    }};
}

impl SampleLine {
    const fn warning(self) -> Self {
        Self {
            highlight: Some(LineHighlight::Warning),
            ..self
        }
    }

    const fn error(self) -> Self {
        Self {
            highlight: Some(LineHighlight::Error),
            ..self
        }
    }

    const fn separated(self) -> Self {
        Self {
            separator: true,
            ..self
        }
    }

    const fn spaced(self) -> Self {
        Self {
            spaced: true,
            ..self
        }
    }
}

const fn role(text: &'static str, role: Role) -> Token {
    Token {
        text,
        kind: TokenKind::Role(role),
    }
}

const SP: Token = Token {
    text: " ",
    kind: TokenKind::Space,
};

const fn plain(text: &'static str) -> Token {
    Token {
        text,
        kind: TokenKind::Plain,
    }
}

const fn kw(text: &'static str) -> Token {
    role(text, Role::Keyword)
}

const fn cf(text: &'static str) -> Token {
    role(text, Role::ControlFlow)
}

const fn ty(text: &'static str) -> Token {
    role(text, Role::Type)
}

const fn cls(text: &'static str) -> Token {
    role(text, Role::Class)
}

const fn iface(text: &'static str) -> Token {
    role(text, Role::Interface)
}

const fn string(text: &'static str) -> Token {
    role(text, Role::String)
}

const fn comment(text: &'static str) -> Token {
    role(text, Role::Comment)
}

const fn op(text: &'static str) -> Token {
    role(text, Role::Operator)
}

const fn num(text: &'static str) -> Token {
    role(text, Role::Number)
}

const fn func(text: &'static str) -> Token {
    role(text, Role::Function)
}

const fn method(text: &'static str) -> Token {
    role(text, Role::Method)
}

const fn var(text: &'static str) -> Token {
    role(text, Role::Variable)
}

const fn param(text: &'static str) -> Token {
    role(text, Role::Parameter)
}

const fn prop(text: &'static str) -> Token {
    role(text, Role::Property)
}

const fn attr(text: &'static str) -> Token {
    role(text, Role::Attribute)
}

const fn tag(text: &'static str) -> Token {
    role(text, Role::Tag)
}

pub(super) static TYPESCRIPT: &[SampleLine] = &[
    line(0, tokens![comment("// Calculate the total price of items")]),
    line(
        0,
        tokens![
            kw("function"),
            SP,
            func("calculateTotal"),
            plain("("),
            plain("items"),
            plain(": "),
            cls("Item"),
            plain("[]) {"),
        ],
    ),
    line(
        1,
        tokens![
            kw("let"),
            SP,
            plain("total"),
            plain(": "),
            kw("number"),
            SP,
            op("="),
            SP,
            num("0"),
            plain(";"),
        ],
    ),
    line(
        1,
        tokens![
            kw("const"),
            SP,
            plain("prefix"),
            SP,
            op("="),
            SP,
            string("\"Item: \""),
            plain(";"),
            SP,
            SP,
            comment("// unused variable"),
        ],
    )
    .warning(),
    line(
        1,
        tokens![
            cf("for"),
            SP,
            plain("("),
            kw("const"),
            SP,
            plain("item"),
            SP,
            kw("of"),
            SP,
            plain("items"),
            plain(") {"),
        ],
    ),
    line(
        2,
        tokens![
            cf("if"),
            SP,
            plain("("),
            plain("item"),
            plain("."),
            plain("isValid"),
            SP,
            op("&&"),
            SP,
            plain("item"),
            plain("."),
            plain("price"),
            SP,
            op(">"),
            SP,
            num("0"),
            plain(") {"),
        ],
    ),
    line(
        3,
        tokens![
            plain("total"),
            SP,
            op("+="),
            SP,
            plain("item"),
            plain("."),
            plain("price"),
            plain(";"),
        ],
    ),
    line(2, tokens![plain("}")]),
    line(1, tokens![plain("}")]),
    line(1, tokens![cf("return"), SP, var("total"), plain(";")]),
    line(0, tokens![plain("}")]),
    line(0, tokens![comment("// Additional examples")]).separated(),
    line(
        0,
        tokens![
            kw("const"),
            SP,
            plain("isEnabled"),
            SP,
            op("="),
            SP,
            role("true", Role::Boolean),
            plain(";"),
        ],
    ),
    line(
        0,
        tokens![
            cf("throw"),
            SP,
            kw("new"),
            SP,
            role("Error", Role::Error),
            plain("("),
            string("\"Not implemented\""),
            plain(");"),
        ],
    )
    .error(),
    line(
        0,
        tokens![
            plain("console"),
            plain("."),
            method("log"),
            plain("("),
            string("\"Success!\""),
            plain(");"),
        ],
    )
    .spaced(),
    line(
        0,
        tokens![
            kw("import"),
            SP,
            plain("{ "),
            cls("Component"),
            plain(" }"),
            SP,
            kw("from"),
            SP,
            string("\"react\""),
            plain(";"),
        ],
    ),
    line(0, tokens![comment("// React/JSX Example")]).separated(),
    line(
        0,
        tokens![
            kw("function"),
            SP,
            func("Button"),
            plain("({"),
            plain("onClick"),
            plain(", "),
            plain("children"),
            plain("})"),
            plain(" {"),
        ],
    ),
    line(1, tokens![cf("return"), SP, plain("(")]),
    line(2, tokens![plain("<"), tag("button")]),
    line(
        3,
        tokens![
            attr("className"),
            plain("="),
            string("\"px-4 py-2 rounded\""),
        ],
    ),
    line(3, tokens![attr("onClick"), plain("="), plain("{onClick}")]),
    line(2, tokens![plain(">")]),
    line(3, tokens![plain("{children}")]),
    line(2, tokens![plain("</"), tag("button"), plain(">")]),
    line(1, tokens![plain(");")]),
    line(0, tokens![plain("}")]),
];

pub(super) static CSHARP: &[SampleLine] = &[
    line(0, tokens![kw("using"), SP, ty("System"), plain(";")]),
    line(0, tokens![kw("using"), SP, ty("System.Linq"), plain(";")]),
    line(0, tokens![kw("using"), SP, ty("Microsoft.AspNetCore.Mvc"), plain(";")]),
    BLANK,
    line(0, tokens![kw("namespace"), SP, ty("Api.Controllers")]),
    line(0, tokens![plain("{")]),
    line(2, tokens![comment("/// <summary>")]),
    line(2, tokens![comment("/// Handles user-related API operations")]),
    line(2, tokens![comment("/// </summary>")]),
    line(2, tokens![plain("["), attr("ApiController"), plain("]")]),
    line(
        2,
        tokens![
            plain("["),
            attr("Route"),
            plain("("),
            string("\"api/[controller]\""),
            plain(")]"),
        ],
    ),
    line(
        2,
        tokens![
            kw("public"),
            SP,
            kw("class"),
            SP,
            cls("UserController"),
            SP,
            plain(":"),
            SP,
            cls("ControllerBase"),
            plain(","),
            SP,
            iface("IUserController"),
        ],
    ),
    line(2, tokens![plain("{")]),
    line(
        4,
        tokens![
            kw("private"),
            SP,
            kw("readonly"),
            SP,
            iface("IUserService"),
            SP,
            var("_service"),
            plain(";"),
        ],
    ),
    BLANK,
    line(
        4,
        tokens![
            kw("public"),
            SP,
            func("UserController"),
            plain("("),
            iface("IUserService"),
            SP,
            param("service"),
            plain(")"),
        ],
    ),
    line(4, tokens![plain("{")]),
    line(
        6,
        tokens![
            var("_service"),
            SP,
            op("="),
            SP,
            param("service"),
            plain(";"),
        ],
    ),
    line(4, tokens![plain("}")]),
    BLANK,
    line(4, tokens![comment("/// <summary>")]),
    line(4, tokens![comment("/// Gets a user by their unique identifier")]),
    line(4, tokens![comment("/// </summary>")]),
    line(
        4,
        tokens![
            plain("["),
            attr("HttpGet"),
            plain("("),
            string("\"organizations/{orgId}/departments/{deptId}/users/{userId}\""),
            plain(")]"),
        ],
    ),
    line(
        4,
        tokens![
            kw("public"),
            SP,
            kw("async"),
            SP,
            cls("Task"),
            plain("<"),
            cls("ActionResult"),
            plain("<"),
            cls("User"),
            plain("?>>"),
            SP,
            func("GetById"),
            plain("("),
            kw("int"),
            SP,
            param("userId"),
            plain(")"),
        ],
    ),
    line(4, tokens![plain("{")]),
    line(
        6,
        tokens![
            kw("var"),
            SP,
            var("user"),
            SP,
            op("="),
            SP,
            kw("await"),
            SP,
            var("_service"),
            plain("."),
            method("FindAsync"),
            plain("("),
            param("userId"),
            plain(");"),
        ],
    ),
    line(
        6,
        tokens![
            cf("if"),
            SP,
            plain("("),
            var("user"),
            SP,
            kw("is"),
            SP,
            kw("null"),
            plain(")"),
        ],
    ),
    line(6, tokens![plain("{")]),
    line(
        8,
        tokens![
            cf("return"),
            SP,
            method("NotFound"),
            plain("("),
            string("$\"User "),
            plain("{"),
            param("userId"),
            plain("}"),
            string(" was not found\""),
            plain(");"),
        ],
    ),
    line(6, tokens![plain("}")]),
    line(
        6,
        tokens![
            cf("return"),
            SP,
            method("Ok"),
            plain("("),
            var("user"),
            plain(");"),
        ],
    ),
    line(4, tokens![plain("}")]),
    line(2, tokens![plain("}")]),
    line(2, tokens![comment("// Record type")]).separated(),
    line(
        2,
        tokens![
            kw("public"),
            SP,
            kw("record"),
            SP,
            cls("User"),
            plain("("),
            kw("int"),
            SP,
            prop("Id"),
            plain(","),
            SP,
            kw("string"),
            plain("?"),
            SP,
            prop("Name"),
            plain(","),
            SP,
            kw("bool"),
            SP,
            prop("IsActive"),
            plain(");"),
        ],
    ),
    line(2, tokens![comment("// LINQ example")]).separated(),
    line(
        2,
        tokens![
            kw("var"),
            SP,
            var("activeUsers"),
            SP,
            op("="),
            SP,
            var("users"),
        ],
    ),
    line(
        4,
        tokens![
            plain("."),
            method("Where"),
            plain("("),
            param("u"),
            SP,
            op("=>"),
            SP,
            param("u"),
            plain("."),
            prop("IsActive"),
            plain(")"),
        ],
    ),
    line(
        4,
        tokens![
            plain("."),
            method("OrderBy"),
            plain("("),
            param("u"),
            SP,
            op("=>"),
            SP,
            param("u"),
            plain("."),
            prop("Name"),
            plain(")"),
        ],
    ),
    line(4, tokens![plain("."), method("ToList"), plain("();")]),
    line(
        2,
        tokens![
            cf("throw"),
            SP,
            kw("new"),
            SP,
            role("InvalidOperationException", Role::Error),
            plain("("),
            string("$\"User "),
            plain("{"),
            var("id"),
            plain("}"),
            string(" not found\""),
            plain(");"),
        ],
    )
    .error()
    .spaced(),
    line(0, tokens![plain("}")]),
];
