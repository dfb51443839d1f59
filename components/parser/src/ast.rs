//! Abstract Syntax Tree node definitions
//!
//! One variant or struct per ESTree node type. Every node carries the
//! [`Span`] of the source text it was parsed from; nodes are built once by
//! the grammar engine and never mutated afterwards.

use crate::options::SourceType;
use core_types::Span;

/// Root node: the complete program
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Top-level statements in source order
    pub body: Vec<Statement>,
    /// Script or module
    pub source_type: SourceType,
    /// Covers the whole input
    pub span: Span,
}

/// Identifier reference, binding or property name
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// Name with escapes decoded
    pub name: String,
    /// Source location
    pub span: Span,
}

/// Literal value
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// String
    String(String),
    /// Number
    Number(f64),
    /// Boolean
    Boolean(bool),
    /// Null
    Null,
    /// Regular expression
    RegExp {
        /// Pattern between the slashes
        pattern: String,
        /// Flags
        flags: String,
    },
    /// BigInt (digits kept as text to preserve the exact value)
    BigInt(String),
}

/// Literal node
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// Decoded value
    pub value: LiteralValue,
    /// Source text of the literal
    pub raw: String,
    /// Source location
    pub span: Span,
}

/// JavaScript statements and declarations
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Expression statement
    ExpressionStatement {
        /// The expression
        expression: Expression,
        /// Raw string contents when this statement is part of a directive prologue
        directive: Option<String>,
        /// Source location
        span: Span,
    },

    /// Block statement
    BlockStatement(BlockStatement),

    /// Empty statement (`;`)
    EmptyStatement {
        /// Source location
        span: Span,
    },

    /// Debugger statement
    DebuggerStatement {
        /// Source location
        span: Span,
    },

    /// With statement (sloppy mode only)
    WithStatement {
        /// Scope object
        object: Expression,
        /// Body
        body: Box<Statement>,
        /// Source location
        span: Span,
    },

    /// Return statement
    ReturnStatement {
        /// Return value
        argument: Option<Expression>,
        /// Source location
        span: Span,
    },

    /// Labeled statement
    LabeledStatement {
        /// Label
        label: Identifier,
        /// Labeled body
        body: Box<Statement>,
        /// Source location
        span: Span,
    },

    /// Break statement
    BreakStatement {
        /// Optional label
        label: Option<Identifier>,
        /// Source location
        span: Span,
    },

    /// Continue statement
    ContinueStatement {
        /// Optional label
        label: Option<Identifier>,
        /// Source location
        span: Span,
    },

    /// If statement
    IfStatement {
        /// Condition
        test: Expression,
        /// Consequent
        consequent: Box<Statement>,
        /// Alternate
        alternate: Option<Box<Statement>>,
        /// Source location
        span: Span,
    },

    /// Switch statement
    SwitchStatement {
        /// Discriminant expression
        discriminant: Expression,
        /// Case clauses
        cases: Vec<SwitchCase>,
        /// Source location
        span: Span,
    },

    /// Throw statement
    ThrowStatement {
        /// Exception to throw
        argument: Expression,
        /// Source location
        span: Span,
    },

    /// Try statement
    TryStatement {
        /// Try block
        block: BlockStatement,
        /// Catch clause
        handler: Option<CatchClause>,
        /// Finally block
        finalizer: Option<BlockStatement>,
        /// Source location
        span: Span,
    },

    /// While loop
    WhileStatement {
        /// Loop condition
        test: Expression,
        /// Loop body
        body: Box<Statement>,
        /// Source location
        span: Span,
    },

    /// Do-while loop
    DoWhileStatement {
        /// Loop body
        body: Box<Statement>,
        /// Loop condition
        test: Expression,
        /// Source location
        span: Span,
    },

    /// For loop
    ForStatement {
        /// Initialization
        init: Option<ForInit>,
        /// Condition
        test: Option<Expression>,
        /// Update expression
        update: Option<Expression>,
        /// Loop body
        body: Box<Statement>,
        /// Source location
        span: Span,
    },

    /// For...in loop
    ForInStatement {
        /// Left side (declaration or assignment target)
        left: ForLeft,
        /// Object to iterate over
        right: Expression,
        /// Loop body
        body: Box<Statement>,
        /// Source location
        span: Span,
    },

    /// For...of loop
    ForOfStatement {
        /// Left side (declaration or assignment target)
        left: ForLeft,
        /// Iterable
        right: Expression,
        /// Loop body
        body: Box<Statement>,
        /// `for await (... of ...)`
        is_await: bool,
        /// Source location
        span: Span,
    },

    /// Function declaration
    FunctionDeclaration(Function),

    /// Variable declaration (var, let, const)
    VariableDeclaration(VariableDeclaration),

    /// Class declaration
    ClassDeclaration(Class),

    /// Import declaration
    ImportDeclaration {
        /// Imported bindings
        specifiers: Vec<ImportSpecifier>,
        /// Module specifier
        source: Literal,
        /// Source location
        span: Span,
    },

    /// `export` of a declaration or a specifier list
    ExportNamedDeclaration {
        /// Exported declaration
        declaration: Option<Box<Statement>>,
        /// Exported specifiers
        specifiers: Vec<ExportSpecifier>,
        /// Re-export source
        source: Option<Literal>,
        /// Source location
        span: Span,
    },

    /// `export default ...`
    ExportDefaultDeclaration {
        /// Exported declaration or expression
        declaration: ExportDefaultKind,
        /// Source location
        span: Span,
    },

    /// `export * from "m"` / `export * as ns from "m"`
    ExportAllDeclaration {
        /// Namespace name
        exported: Option<Identifier>,
        /// Module specifier
        source: Literal,
        /// Source location
        span: Span,
    },
}

impl Statement {
    /// Source range of the statement
    pub fn span(&self) -> Span {
        match self {
            Statement::BlockStatement(block) => block.span,
            Statement::FunctionDeclaration(function) => function.span,
            Statement::VariableDeclaration(declaration) => declaration.span,
            Statement::ClassDeclaration(class) => class.span,
            Statement::ExpressionStatement { span, .. }
            | Statement::EmptyStatement { span }
            | Statement::DebuggerStatement { span }
            | Statement::WithStatement { span, .. }
            | Statement::ReturnStatement { span, .. }
            | Statement::LabeledStatement { span, .. }
            | Statement::BreakStatement { span, .. }
            | Statement::ContinueStatement { span, .. }
            | Statement::IfStatement { span, .. }
            | Statement::SwitchStatement { span, .. }
            | Statement::ThrowStatement { span, .. }
            | Statement::TryStatement { span, .. }
            | Statement::WhileStatement { span, .. }
            | Statement::DoWhileStatement { span, .. }
            | Statement::ForStatement { span, .. }
            | Statement::ForInStatement { span, .. }
            | Statement::ForOfStatement { span, .. }
            | Statement::ImportDeclaration { span, .. }
            | Statement::ExportNamedDeclaration { span, .. }
            | Statement::ExportDefaultDeclaration { span, .. }
            | Statement::ExportAllDeclaration { span, .. } => *span,
        }
    }
}

/// Block statement; also used for function bodies
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    /// Statements in the block
    pub body: Vec<Statement>,
    /// Source location
    pub span: Span,
}

/// Switch case
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// Test expression (None for default)
    pub test: Option<Expression>,
    /// Consequent statements
    pub consequent: Vec<Statement>,
    /// Source location
    pub span: Span,
}

/// Catch clause
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    /// Parameter (optional since ES2019)
    pub param: Option<Pattern>,
    /// Body
    pub body: BlockStatement,
    /// Source location
    pub span: Span,
}

/// Variable declaration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// var
    Var,
    /// let
    Let,
    /// const
    Const,
}

impl VariableKind {
    /// Source spelling
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

/// Variable declaration
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// Declaration kind
    pub kind: VariableKind,
    /// Declarators, at least one
    pub declarations: Vec<VariableDeclarator>,
    /// Source location
    pub span: Span,
}

/// Variable declarator
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    /// Binding pattern
    pub id: Pattern,
    /// Initializer
    pub init: Option<Expression>,
    /// Source location
    pub span: Span,
}

/// For loop initialization
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    /// Variable declaration
    VariableDeclaration(VariableDeclaration),
    /// Expression
    Expression(Expression),
}

/// Left side of for-in/for-of loop
#[derive(Debug, Clone, PartialEq)]
pub enum ForLeft {
    /// Declaration with a single binding (`for (let x of ...)`)
    VariableDeclaration(VariableDeclaration),
    /// Existing variable, member expression or destructuring pattern
    Pattern(Pattern),
}

/// Function declaration, expression, or method value
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Function name
    pub id: Option<Identifier>,
    /// Formal parameters
    pub params: Vec<Pattern>,
    /// Function body
    pub body: BlockStatement,
    /// Is async function
    pub is_async: bool,
    /// Is generator function
    pub is_generator: bool,
    /// Source location
    pub span: Span,
}

/// Arrow function
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunction {
    /// Formal parameters
    pub params: Vec<Pattern>,
    /// Concise or block body
    pub body: ArrowFunctionBody,
    /// Is async arrow
    pub is_async: bool,
    /// Source location
    pub span: Span,
}

/// Arrow function body
#[derive(Debug, Clone, PartialEq)]
pub enum ArrowFunctionBody {
    /// Expression body
    Expression(Box<Expression>),
    /// Block body
    Block(BlockStatement),
}

/// Class declaration or expression
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    /// Class name
    pub id: Option<Identifier>,
    /// Superclass expression
    pub super_class: Option<Box<Expression>>,
    /// Class body
    pub body: ClassBody,
    /// Source location
    pub span: Span,
}

/// Class body
#[derive(Debug, Clone, PartialEq)]
pub struct ClassBody {
    /// Method definitions in source order
    pub body: Vec<MethodDefinition>,
    /// Source location
    pub span: Span,
}

/// Method kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// Constructor
    Constructor,
    /// Regular method
    Method,
    /// Getter
    Get,
    /// Setter
    Set,
}

impl MethodKind {
    /// ESTree spelling
    pub fn as_str(self) -> &'static str {
        match self {
            MethodKind::Constructor => "constructor",
            MethodKind::Method => "method",
            MethodKind::Get => "get",
            MethodKind::Set => "set",
        }
    }
}

/// Class method definition
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDefinition {
    /// Method name
    pub key: Expression,
    /// Is computed (e.g., [expr])
    pub computed: bool,
    /// Function value
    pub value: Function,
    /// Method kind
    pub kind: MethodKind,
    /// Is static
    pub is_static: bool,
    /// Source location
    pub span: Span,
}

/// Object literal property kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Plain value or method
    Init,
    /// Getter
    Get,
    /// Setter
    Set,
}

impl PropertyKind {
    /// ESTree spelling
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKind::Init => "init",
            PropertyKind::Get => "get",
            PropertyKind::Set => "set",
        }
    }
}

/// Object literal property
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Key (Identifier, Literal, or any expression when computed)
    pub key: Expression,
    /// Value
    pub value: Expression,
    /// Property kind
    pub kind: PropertyKind,
    /// Is method shorthand (`{ m() {} }`)
    pub method: bool,
    /// Is shorthand (e.g., { a } instead of { a: a })
    pub shorthand: bool,
    /// Is computed
    pub computed: bool,
    /// Source location
    pub span: Span,
}

/// Object literal member
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectProperty {
    /// Property with key and value
    Property(Property),
    /// Spread property
    SpreadElement {
        /// Spread argument
        argument: Expression,
        /// Source location
        span: Span,
    },
}

impl ObjectProperty {
    /// Source range of the member
    pub fn span(&self) -> Span {
        match self {
            ObjectProperty::Property(property) => property.span,
            ObjectProperty::SpreadElement { span, .. } => *span,
        }
    }
}

/// Template literal
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    /// String parts; always one more than `expressions`
    pub quasis: Vec<TemplateElement>,
    /// Substitutions
    pub expressions: Vec<Expression>,
    /// Source location
    pub span: Span,
}

/// Template literal element
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateElement {
    /// Raw string value
    pub raw: String,
    /// Cooked string value; None for an invalid escape in a tagged template
    pub cooked: Option<String>,
    /// Is tail element
    pub tail: bool,
    /// Source location (excluding the delimiters)
    pub span: Span,
}

/// JavaScript expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Identifier reference
    Identifier(Identifier),

    /// Literal
    Literal(Literal),

    /// `this`
    ThisExpression {
        /// Source location
        span: Span,
    },

    /// `super` (only as callee or member object)
    Super {
        /// Source location
        span: Span,
    },

    /// Array literal
    ArrayExpression {
        /// Elements; None for holes
        elements: Vec<Option<Expression>>,
        /// Source location
        span: Span,
    },

    /// Object literal
    ObjectExpression {
        /// Members
        properties: Vec<ObjectProperty>,
        /// Source location
        span: Span,
    },

    /// Function expression
    FunctionExpression(Box<Function>),

    /// Arrow function
    ArrowFunctionExpression(Box<ArrowFunction>),

    /// Class expression
    ClassExpression(Box<Class>),

    /// Template literal
    TemplateLiteral(TemplateLiteral),

    /// Tagged template
    TaggedTemplateExpression {
        /// Tag function
        tag: Box<Expression>,
        /// Template
        quasi: TemplateLiteral,
        /// Source location
        span: Span,
    },

    /// Unary expression
    UnaryExpression {
        /// Operator
        operator: UnaryOperator,
        /// Operand
        argument: Box<Expression>,
        /// Source location
        span: Span,
    },

    /// Update expression (++/--)
    UpdateExpression {
        /// Operator
        operator: UpdateOperator,
        /// Is prefix
        prefix: bool,
        /// Operand
        argument: Box<Expression>,
        /// Source location
        span: Span,
    },

    /// Binary expression
    BinaryExpression {
        /// Operator
        operator: BinaryOperator,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
        /// Source location
        span: Span,
    },

    /// Logical expression
    LogicalExpression {
        /// Operator
        operator: LogicalOperator,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
        /// Source location
        span: Span,
    },

    /// Assignment expression
    AssignmentExpression {
        /// Operator
        operator: AssignmentOperator,
        /// Assignment target
        left: Box<Pattern>,
        /// Value
        right: Box<Expression>,
        /// Source location
        span: Span,
    },

    /// Conditional (ternary) expression
    ConditionalExpression {
        /// Condition
        test: Box<Expression>,
        /// Consequent
        consequent: Box<Expression>,
        /// Alternate
        alternate: Box<Expression>,
        /// Source location
        span: Span,
    },

    /// Call expression
    CallExpression {
        /// Callee
        callee: Box<Expression>,
        /// Arguments (may contain SpreadElement)
        arguments: Vec<Expression>,
        /// Called through `?.`
        optional: bool,
        /// Source location
        span: Span,
    },

    /// New expression
    NewExpression {
        /// Constructor
        callee: Box<Expression>,
        /// Arguments (may contain SpreadElement)
        arguments: Vec<Expression>,
        /// Source location
        span: Span,
    },

    /// Member access
    MemberExpression {
        /// Object
        object: Box<Expression>,
        /// Property (Identifier when not computed)
        property: Box<Expression>,
        /// Is computed (obj[prop])
        computed: bool,
        /// Accessed through `?.`
        optional: bool,
        /// Source location
        span: Span,
    },

    /// Wrapper around a call/member chain containing `?.`
    ChainExpression {
        /// The chain
        expression: Box<Expression>,
        /// Source location
        span: Span,
    },

    /// Comma-separated expressions
    SequenceExpression {
        /// Expressions, at least two
        expressions: Vec<Expression>,
        /// Source location
        span: Span,
    },

    /// Yield expression
    YieldExpression {
        /// Value to yield
        argument: Option<Box<Expression>>,
        /// `yield*`
        delegate: bool,
        /// Source location
        span: Span,
    },

    /// Await expression
    AwaitExpression {
        /// Awaited value
        argument: Box<Expression>,
        /// Source location
        span: Span,
    },

    /// `new.target` / `import.meta`
    MetaProperty {
        /// `new` or `import`
        meta: Identifier,
        /// `target` or `meta`
        property: Identifier,
        /// Source location
        span: Span,
    },

    /// Dynamic `import(source)`
    ImportExpression {
        /// Module specifier expression
        source: Box<Expression>,
        /// Source location
        span: Span,
    },

    /// Spread element (`...x`) in arrays, calls and `new`
    SpreadElement {
        /// Spread argument
        argument: Box<Expression>,
        /// Source location
        span: Span,
    },

    /// Parenthesized expression, serialized only when parens are preserved
    ParenthesizedExpression {
        /// Inner expression
        expression: Box<Expression>,
        /// Source location, including the parentheses
        span: Span,
    },
}

impl Expression {
    /// Source range of the expression
    pub fn span(&self) -> Span {
        match self {
            Expression::Identifier(identifier) => identifier.span,
            Expression::Literal(literal) => literal.span,
            Expression::FunctionExpression(function) => function.span,
            Expression::ArrowFunctionExpression(arrow) => arrow.span,
            Expression::ClassExpression(class) => class.span,
            Expression::TemplateLiteral(template) => template.span,
            Expression::ThisExpression { span }
            | Expression::Super { span }
            | Expression::ArrayExpression { span, .. }
            | Expression::ObjectExpression { span, .. }
            | Expression::TaggedTemplateExpression { span, .. }
            | Expression::UnaryExpression { span, .. }
            | Expression::UpdateExpression { span, .. }
            | Expression::BinaryExpression { span, .. }
            | Expression::LogicalExpression { span, .. }
            | Expression::AssignmentExpression { span, .. }
            | Expression::ConditionalExpression { span, .. }
            | Expression::CallExpression { span, .. }
            | Expression::NewExpression { span, .. }
            | Expression::MemberExpression { span, .. }
            | Expression::ChainExpression { span, .. }
            | Expression::SequenceExpression { span, .. }
            | Expression::YieldExpression { span, .. }
            | Expression::AwaitExpression { span, .. }
            | Expression::MetaProperty { span, .. }
            | Expression::ImportExpression { span, .. }
            | Expression::SpreadElement { span, .. }
            | Expression::ParenthesizedExpression { span, .. } => *span,
        }
    }

    /// Strip any number of enclosing parentheses
    pub fn unparenthesized(&self) -> &Expression {
        let mut expr = self;
        while let Expression::ParenthesizedExpression { expression, .. } = expr {
            expr = expression;
        }
        expr
    }
}

/// Binding and assignment targets
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Simple identifier
    Identifier(Identifier),
    /// Object destructuring
    ObjectPattern {
        /// Properties, optionally ending in a rest element
        properties: Vec<ObjectPatternProperty>,
        /// Source location
        span: Span,
    },
    /// Array destructuring
    ArrayPattern {
        /// Elements; None for holes
        elements: Vec<Option<Pattern>>,
        /// Source location
        span: Span,
    },
    /// Rest element (`...x`)
    RestElement {
        /// Target
        argument: Box<Pattern>,
        /// Source location
        span: Span,
    },
    /// Default value (`x = 1`)
    AssignmentPattern {
        /// Target
        left: Box<Pattern>,
        /// Default value
        right: Box<Expression>,
        /// Source location
        span: Span,
    },
    /// Member expression target (assignment positions only)
    Expression(Box<Expression>),
}

impl Pattern {
    /// Source range of the pattern
    pub fn span(&self) -> Span {
        match self {
            Pattern::Identifier(identifier) => identifier.span,
            Pattern::Expression(expression) => expression.span(),
            Pattern::ObjectPattern { span, .. }
            | Pattern::ArrayPattern { span, .. }
            | Pattern::RestElement { span, .. }
            | Pattern::AssignmentPattern { span, .. } => *span,
        }
    }
}

/// Property inside an object pattern
#[derive(Debug, Clone, PartialEq)]
pub struct PatternProperty {
    /// Key
    pub key: Expression,
    /// Target
    pub value: Pattern,
    /// Is shorthand (`{ a }`)
    pub shorthand: bool,
    /// Is computed
    pub computed: bool,
    /// Source location
    pub span: Span,
}

/// Object pattern member
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectPatternProperty {
    /// Key/target pair
    Property(PatternProperty),
    /// Rest element (`...rest`)
    RestElement {
        /// Target
        argument: Box<Pattern>,
        /// Source location
        span: Span,
    },
}

/// Import clause member
#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifier {
    /// `{ imported as local }`
    Named {
        /// Exported name in the source module
        imported: Identifier,
        /// Local binding
        local: Identifier,
        /// Source location
        span: Span,
    },
    /// `local` (default import)
    Default {
        /// Local binding
        local: Identifier,
        /// Source location
        span: Span,
    },
    /// `* as local`
    Namespace {
        /// Local binding
        local: Identifier,
        /// Source location
        span: Span,
    },
}

/// Export clause member (`local as exported`)
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpecifier {
    /// Local (or re-exported) name
    pub local: Identifier,
    /// Exported name
    pub exported: Identifier,
    /// Source location
    pub span: Span,
}

/// What `export default` exports
#[derive(Debug, Clone, PartialEq)]
pub enum ExportDefaultKind {
    /// `export default function ...` (name optional)
    FunctionDeclaration(Function),
    /// `export default class ...` (name optional)
    ClassDeclaration(Class),
    /// Any other assignment expression
    Expression(Expression),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Division
    Div,
    /// Modulo
    Mod,
    /// Exponentiation
    Exp,
    /// Equality
    Eq,
    /// Inequality
    NotEq,
    /// Strict equality
    StrictEq,
    /// Strict inequality
    StrictNotEq,
    /// Less than
    Lt,
    /// Less than or equal
    LtEq,
    /// Greater than
    Gt,
    /// Greater than or equal
    GtEq,
    /// Bitwise AND
    BitwiseAnd,
    /// Bitwise OR
    BitwiseOr,
    /// Bitwise XOR
    BitwiseXor,
    /// Left shift
    LeftShift,
    /// Right shift
    RightShift,
    /// Unsigned right shift
    UnsignedRightShift,
    /// Instanceof
    Instanceof,
    /// In
    In,
}

impl BinaryOperator {
    /// Source spelling
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Exp => "**",
            BinaryOperator::Eq => "==",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::StrictEq => "===",
            BinaryOperator::StrictNotEq => "!==",
            BinaryOperator::Lt => "<",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::LeftShift => "<<",
            BinaryOperator::RightShift => ">>",
            BinaryOperator::UnsignedRightShift => ">>>",
            BinaryOperator::Instanceof => "instanceof",
            BinaryOperator::In => "in",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Negate
    Minus,
    /// Plus (type coercion)
    Plus,
    /// Logical NOT
    Not,
    /// Bitwise NOT
    BitwiseNot,
    /// Typeof
    Typeof,
    /// Void
    Void,
    /// Delete
    Delete,
}

impl UnaryOperator {
    /// Source spelling
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::Not => "!",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::Typeof => "typeof",
            UnaryOperator::Void => "void",
            UnaryOperator::Delete => "delete",
        }
    }
}

/// Update operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    /// Increment
    Increment,
    /// Decrement
    Decrement,
}

impl UpdateOperator {
    /// Source spelling
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        }
    }
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    /// Logical AND
    And,
    /// Logical OR
    Or,
    /// Nullish coalescing
    NullishCoalesce,
}

impl LogicalOperator {
    /// Source spelling
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOperator::And => "&&",
            LogicalOperator::Or => "||",
            LogicalOperator::NullishCoalesce => "??",
        }
    }
}

/// Assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    /// Simple assignment (=)
    Assign,
    /// Addition assignment (+=)
    AddAssign,
    /// Subtraction assignment (-=)
    SubAssign,
    /// Multiplication assignment (*=)
    MulAssign,
    /// Division assignment (/=)
    DivAssign,
    /// Modulo assignment (%=)
    ModAssign,
    /// Exponentiation assignment (**=)
    ExpAssign,
    /// Bitwise AND assignment (&=)
    BitAndAssign,
    /// Bitwise OR assignment (|=)
    BitOrAssign,
    /// Bitwise XOR assignment (^=)
    BitXorAssign,
    /// Left shift assignment (<<=)
    LeftShiftAssign,
    /// Right shift assignment (>>=)
    RightShiftAssign,
    /// Unsigned right shift assignment (>>>=)
    UnsignedRightShiftAssign,
    /// Logical AND assignment (&&=)
    LogicalAndAssign,
    /// Logical OR assignment (||=)
    LogicalOrAssign,
    /// Nullish coalescing assignment (??=)
    NullishCoalesceAssign,
}

impl AssignmentOperator {
    /// Source spelling
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::AddAssign => "+=",
            AssignmentOperator::SubAssign => "-=",
            AssignmentOperator::MulAssign => "*=",
            AssignmentOperator::DivAssign => "/=",
            AssignmentOperator::ModAssign => "%=",
            AssignmentOperator::ExpAssign => "**=",
            AssignmentOperator::BitAndAssign => "&=",
            AssignmentOperator::BitOrAssign => "|=",
            AssignmentOperator::BitXorAssign => "^=",
            AssignmentOperator::LeftShiftAssign => "<<=",
            AssignmentOperator::RightShiftAssign => ">>=",
            AssignmentOperator::UnsignedRightShiftAssign => ">>>=",
            AssignmentOperator::LogicalAndAssign => "&&=",
            AssignmentOperator::LogicalOrAssign => "||=",
            AssignmentOperator::NullishCoalesceAssign => "??=",
        }
    }

    /// Logical assignment operators (`&&=`, `||=`, `??=`)
    pub fn is_logical(self) -> bool {
        matches!(
            self,
            AssignmentOperator::LogicalAndAssign
                | AssignmentOperator::LogicalOrAssign
                | AssignmentOperator::NullishCoalesceAssign
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::SourcePosition;

    fn span(start: usize, end: usize) -> Span {
        Span::new(
            SourcePosition {
                line: 1,
                column: start as u32,
                offset: start,
            },
            SourcePosition {
                line: 1,
                column: end as u32,
                offset: end,
            },
        )
    }

    fn ident(name: &str, start: usize) -> Identifier {
        Identifier {
            name: name.to_string(),
            span: span(start, start + name.len()),
        }
    }

    #[test]
    fn test_statement_span() {
        let stmt = Statement::ExpressionStatement {
            expression: Expression::Identifier(ident("a", 0)),
            directive: None,
            span: span(0, 2),
        };
        assert_eq!(stmt.span(), span(0, 2));

        let block = Statement::BlockStatement(BlockStatement {
            body: vec![stmt],
            span: span(0, 4),
        });
        assert_eq!(block.span().end.offset, 4);
    }

    #[test]
    fn test_binary_expression() {
        let expr = Expression::BinaryExpression {
            left: Box::new(Expression::Literal(Literal {
                value: LiteralValue::Number(1.0),
                raw: "1".to_string(),
                span: span(0, 1),
            })),
            operator: BinaryOperator::Add,
            right: Box::new(Expression::Literal(Literal {
                value: LiteralValue::Number(2.0),
                raw: "2".to_string(),
                span: span(4, 5),
            })),
            span: span(0, 5),
        };
        assert!(matches!(expr, Expression::BinaryExpression { operator: BinaryOperator::Add, .. }));
        assert_eq!(expr.span(), span(0, 5));
    }

    #[test]
    fn test_unparenthesized() {
        let inner = Expression::Identifier(ident("x", 2));
        let expr = Expression::ParenthesizedExpression {
            expression: Box::new(Expression::ParenthesizedExpression {
                expression: Box::new(inner.clone()),
                span: span(1, 4),
            }),
            span: span(0, 5),
        };
        assert_eq!(expr.unparenthesized(), &inner);
    }

    #[test]
    fn test_pattern_span() {
        let pattern = Pattern::AssignmentPattern {
            left: Box::new(Pattern::Identifier(ident("x", 0))),
            right: Box::new(Expression::Identifier(ident("y", 4))),
            span: span(0, 5),
        };
        assert_eq!(pattern.span(), span(0, 5));
        assert_eq!(Pattern::Identifier(ident("abc", 3)).span(), span(3, 6));
    }

    #[test]
    fn test_operator_spelling() {
        assert_eq!(BinaryOperator::UnsignedRightShift.as_str(), ">>>");
        assert_eq!(BinaryOperator::Instanceof.as_str(), "instanceof");
        assert_eq!(UnaryOperator::Typeof.as_str(), "typeof");
        assert_eq!(LogicalOperator::NullishCoalesce.as_str(), "??");
        assert_eq!(AssignmentOperator::ExpAssign.as_str(), "**=");
        assert!(AssignmentOperator::NullishCoalesceAssign.is_logical());
        assert!(!AssignmentOperator::AddAssign.is_logical());
        assert_eq!(MethodKind::Constructor.as_str(), "constructor");
        assert_eq!(VariableKind::Const.as_str(), "const");
    }
}
