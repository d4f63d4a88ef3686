//! Top-level members: design element declarations, module items, class
//! items, generate constructs, and hierarchy instantiation.

use tracing::trace;

use svz_common::diagnostics::diagnostic_codes;
use svz_scanner::{Token, TokenKind};

use crate::node::{
    AnsiPortData, CaseGenerateData, ClassDeclarationData, ClassMethodData, ClassPropertyData,
    CompilationUnitData, ConditionalConstraintData, ConstraintBlockData, ConstraintDeclarationData,
    ContinuousAssignData, DataDeclarationData, EmptyMemberData, ExpressionConstraintData,
    ExtendsClauseData, FunctionDeclarationData, FunctionPrototypeData, GenerateBlockData,
    GenerateRegionData, GenvarDeclarationData, HierarchicalInstanceData,
    HierarchyInstantiationData, IfGenerateData, ImplementsClauseData, ImplicationConstraintData,
    LoopGenerateData, ModuleDeclarationData, ModuleHeaderData, NetDeclarationData, NodeData,
    NodeIndex, NonAnsiPortData, PackageImportData, PackageImportItemData, ParamValueAssignData,
    ParameterDeclarationData, ParameterPortListData, PortConnectionData, PortDeclarationData,
    PortListData, ProceduralBlockData, SeparatedList, SyntaxKind, TimeUnitsDeclarationData,
    TokenData, TypedefData, UniquenessConstraintData,
};

use super::expressions::{is_possible_expression, ExpressionOptions, CONDITIONAL_PRECEDENCE};
use super::types::is_data_type_start;
use super::Parser;

fn is_net_type(kind: TokenKind) -> bool {
    use TokenKind::*;
    matches!(
        kind,
        WireKeyword
            | WAndKeyword
            | WOrKeyword
            | TriKeyword
            | TriAndKeyword
            | TriOrKeyword
            | Tri0Keyword
            | Tri1Keyword
            | TriRegKeyword
            | UWireKeyword
            | Supply0Keyword
            | Supply1Keyword
    )
}

fn is_direction(kind: TokenKind) -> bool {
    use TokenKind::*;
    matches!(kind, InputKeyword | OutputKeyword | InOutKeyword | RefKeyword)
}

impl Parser<'_> {
    pub(crate) fn parse_compilation_unit(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let members = self.parse_member_list(&[]);
        let end_of_file = self.expect(TokenKind::EndOfFile);
        // span through the end-of-file token so trailing trivia is covered
        let end = end_of_file.end.max(pos);
        self.arena.alloc(
            SyntaxKind::CompilationUnit,
            pos,
            end,
            NodeData::CompilationUnit(CompilationUnitData { members, end_of_file }),
        )
    }

    /// Member list ending at any of `stop` or end of file. Unrecognized
    /// tokens are reported once and skipped one at a time.
    fn parse_member_list(&mut self, stop: &[TokenKind]) -> Vec<NodeIndex> {
        let mut members = Vec::new();
        while !self.tokens.at_end() && !stop.contains(&self.tokens.current_kind()) {
            let before = self.tokens.position();
            if let Some(member) = self.parse_member() {
                members.push(member);
            }
            if self.tokens.position() == before {
                trace!(pos = self.tokens.position(), "skipping unrecognized member token");
                self.error_at_current(diagnostic_codes::EXPECTED_MEMBER, &[]);
                self.tokens.consume();
            }
        }
        members
    }

    /// Entry point used when a caller needs exactly one member node.
    pub(crate) fn parse_member_entry(&mut self) -> NodeIndex {
        match self.parse_member() {
            Some(member) => member,
            None => {
                self.error_at_current(diagnostic_codes::EXPECTED_MEMBER, &[]);
                let pos = self.node_pos();
                if !self.tokens.at_end() {
                    self.tokens.consume();
                }
                let semicolon = Token::missing(TokenKind::Semicolon, self.tokens.prev_token_end());
                self.finish(
                    SyntaxKind::EmptyMember,
                    pos,
                    NodeData::EmptyMember(EmptyMemberData { attributes: Vec::new(), semicolon }),
                )
            }
        }
    }

    /// Dispatch one member. Returns `None` when the current token cannot
    /// start a member, without consuming anything.
    pub(crate) fn parse_member(&mut self) -> Option<NodeIndex> {
        use TokenKind::*;
        let pos = self.node_pos();
        let attributes = self.parse_attributes();
        let member = match self.tokens.current_kind() {
            ModuleKeyword | MacromoduleKeyword | InterfaceKeyword | ProgramKeyword
            | PackageKeyword => self.parse_module_declaration(attributes, pos),
            ClassKeyword => self.parse_class_declaration(attributes, pos, None),
            VirtualKeyword if self.tokens.peek_kind(1) == ClassKeyword => {
                let virtual_keyword = self.tokens.consume();
                self.parse_class_declaration(attributes, pos, Some(virtual_keyword))
            }
            FunctionKeyword | TaskKeyword => self.parse_function_declaration(attributes, pos),
            ParameterKeyword | LocalParamKeyword => {
                self.parse_parameter_declaration(attributes, pos, true)
            }
            TypedefKeyword => self.parse_typedef(attributes, pos),
            ImportKeyword => self.parse_package_import(attributes, pos),
            GenvarKeyword => self.parse_genvar_declaration(attributes, pos),
            TimeUnitKeyword | TimePrecisionKeyword => {
                self.parse_timeunits_declaration(attributes, pos)
            }
            AssignKeyword => self.parse_continuous_assign(attributes, pos),
            InitialKeyword | FinalKeyword | AlwaysKeyword | AlwaysCombKeyword | AlwaysFfKeyword
            | AlwaysLatchKeyword => self.parse_procedural_block(attributes, pos),
            GenerateKeyword => self.parse_generate_region(attributes, pos),
            ForKeyword => self.parse_loop_generate(attributes, pos),
            IfKeyword => self.parse_if_generate(attributes, pos),
            CaseKeyword => self.parse_case_generate(attributes, pos),
            Semicolon => {
                let semicolon = self.tokens.consume();
                self.finish(
                    SyntaxKind::EmptyMember,
                    pos,
                    NodeData::EmptyMember(EmptyMemberData { attributes, semicolon }),
                )
            }
            kind if is_direction(kind) => self.parse_port_declaration(attributes, pos),
            kind if is_net_type(kind) => self.parse_net_declaration(attributes, pos),
            kind if is_data_type_start(kind)
                || matches!(kind, ConstKeyword | VarKeyword | StaticKeyword | AutomaticKeyword) =>
            {
                self.parse_data_declaration(attributes, pos)
            }
            Identifier => {
                if self.is_hierarchy_instantiation() {
                    self.parse_hierarchy_instantiation(attributes, pos)
                } else if self.is_variable_declaration() {
                    self.parse_data_declaration(attributes, pos)
                } else if !attributes.is_empty() {
                    // attributes already consumed; report and resync
                    self.error_at_current(diagnostic_codes::EXPECTED_MEMBER, &[]);
                    let semicolon =
                        Token::missing(TokenKind::Semicolon, self.tokens.prev_token_end());
                    self.finish(
                        SyntaxKind::EmptyMember,
                        pos,
                        NodeData::EmptyMember(EmptyMemberData { attributes, semicolon }),
                    )
                } else {
                    return None;
                }
            }
            _ => {
                if attributes.is_empty() {
                    return None;
                }
                self.error_at_current(diagnostic_codes::EXPECTED_MEMBER, &[]);
                let semicolon = Token::missing(TokenKind::Semicolon, self.tokens.prev_token_end());
                self.finish(
                    SyntaxKind::EmptyMember,
                    pos,
                    NodeData::EmptyMember(EmptyMemberData { attributes, semicolon }),
                )
            }
        };
        Some(member)
    }

    // ------------------------------------------------------------------
    // Design elements
    // ------------------------------------------------------------------

    fn parse_module_declaration(
        &mut self,
        attributes: Vec<NodeIndex>,
        pos: u32,
    ) -> NodeIndex {
        let keyword_kind = self.tokens.current_kind();
        let (kind, end_kind) = match keyword_kind {
            TokenKind::InterfaceKeyword => {
                (SyntaxKind::InterfaceDeclaration, TokenKind::EndInterfaceKeyword)
            }
            TokenKind::ProgramKeyword => {
                (SyntaxKind::ProgramDeclaration, TokenKind::EndProgramKeyword)
            }
            TokenKind::PackageKeyword => {
                (SyntaxKind::PackageDeclaration, TokenKind::EndPackageKeyword)
            }
            _ => (SyntaxKind::ModuleDeclaration, TokenKind::EndModuleKeyword),
        };
        let header = self.parse_module_header();
        let members = self.parse_member_list(&[end_kind]);
        let end_keyword = self.expect(end_kind);
        let end_name = self.parse_named_block_clause_opt();
        self.finish(
            kind,
            pos,
            NodeData::ModuleDeclaration(ModuleDeclarationData {
                attributes,
                header,
                members,
                end_keyword,
                end_name,
            }),
        )
    }

    fn parse_module_header(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let keyword = self.tokens.consume();
        let lifetime = self.parse_lifetime_opt();
        let name = self.expect_identifier();
        let parameter_ports = if self.tokens.current_kind() == TokenKind::Hash
            && self.tokens.peek_kind(1) == TokenKind::OpenParen
        {
            Some(self.parse_parameter_port_list())
        } else {
            None
        };
        let ports = if self.tokens.current_kind() == TokenKind::OpenParen {
            Some(self.parse_port_list())
        } else {
            None
        };
        let semicolon = self.expect(TokenKind::Semicolon);
        self.finish(
            SyntaxKind::ModuleHeader,
            pos,
            NodeData::ModuleHeader(ModuleHeaderData {
                keyword,
                lifetime,
                name,
                parameter_ports,
                ports,
                semicolon,
            }),
        )
    }

    fn parse_lifetime_opt(&mut self) -> Option<Token> {
        match self.tokens.current_kind() {
            TokenKind::StaticKeyword | TokenKind::AutomaticKeyword => Some(self.tokens.consume()),
            _ => None,
        }
    }

    /// `#( parameter_declaration, ... )` with one declarator per item.
    fn parse_parameter_port_list(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let hash = self.expect(TokenKind::Hash);
        let open_paren = self.expect(TokenKind::OpenParen);
        let declarations = if self.tokens.current_kind() == TokenKind::CloseParen {
            SeparatedList::new()
        } else {
            self.parse_comma_list(|p| p.parse_parameter_port())
        };
        let close_paren = self.expect(TokenKind::CloseParen);
        self.finish(
            SyntaxKind::ParameterPortList,
            pos,
            NodeData::ParameterPortList(ParameterPortListData {
                hash,
                open_paren,
                declarations,
                close_paren,
            }),
        )
    }

    fn parse_parameter_port(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let keyword = match self.tokens.current_kind() {
            TokenKind::ParameterKeyword | TokenKind::LocalParamKeyword => {
                Some(self.tokens.consume())
            }
            _ => None,
        };
        let type_node = self.parse_parameter_type();
        let declarator = self.parse_declarator();
        let mut declarators = SeparatedList::new();
        declarators.items.push(declarator);
        self.finish(
            SyntaxKind::ParameterDeclaration,
            pos,
            NodeData::ParameterDeclaration(ParameterDeclarationData {
                attributes: Vec::new(),
                keyword,
                type_node,
                declarators,
                semicolon: None,
            }),
        )
    }

    /// Parameter types are implicit unless a type keyword or a
    /// `name name` pair follows.
    fn parse_parameter_type(&mut self) -> NodeIndex {
        if self.tokens.current_kind() == TokenKind::Identifier
            && self.tokens.peek_kind(1) != TokenKind::Identifier
        {
            return self.implicit_type();
        }
        self.parse_data_type(true)
    }

    pub(crate) fn parse_parameter_declaration(
        &mut self,
        attributes: Vec<NodeIndex>,
        pos: u32,
        with_semicolon: bool,
    ) -> NodeIndex {
        let keyword = Some(self.tokens.consume());
        let type_node = self.parse_parameter_type();
        let declarators = self.parse_declarator_list();
        let semicolon = if with_semicolon {
            Some(self.expect(TokenKind::Semicolon))
        } else {
            None
        };
        self.finish(
            SyntaxKind::ParameterDeclaration,
            pos,
            NodeData::ParameterDeclaration(ParameterDeclarationData {
                attributes,
                keyword,
                type_node,
                declarators,
                semicolon,
            }),
        )
    }

    // ------------------------------------------------------------------
    // Ports
    // ------------------------------------------------------------------

    fn parse_port_list(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let open_paren = self.expect(TokenKind::OpenParen);
        if self.tokens.current_kind() == TokenKind::CloseParen {
            let close_paren = self.tokens.consume();
            return self.finish(
                SyntaxKind::AnsiPortList,
                pos,
                NodeData::PortList(PortListData {
                    open_paren,
                    ports: SeparatedList::new(),
                    close_paren,
                }),
            );
        }
        let non_ansi = self.is_non_ansi_port_list();
        let ports = if non_ansi {
            self.parse_comma_list(|p| p.parse_non_ansi_port())
        } else {
            self.parse_comma_list(|p| p.parse_ansi_port())
        };
        let close_paren = self.expect(TokenKind::CloseParen);
        let kind = if non_ansi {
            SyntaxKind::NonAnsiPortList
        } else {
            SyntaxKind::AnsiPortList
        };
        self.finish(
            kind,
            pos,
            NodeData::PortList(PortListData { open_paren, ports, close_paren }),
        )
    }

    fn parse_non_ansi_port(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        if self.tokens.current_kind() == TokenKind::Dot {
            let dot = self.tokens.consume();
            let name = self.expect_identifier();
            let open_paren = self.expect(TokenKind::OpenParen);
            let inner = if self.tokens.current_kind() == TokenKind::CloseParen {
                None
            } else {
                Some(self.parse_expression())
            };
            let close_paren = self.expect(TokenKind::CloseParen);
            return self.finish(
                SyntaxKind::ExplicitNonAnsiPort,
                pos,
                NodeData::NonAnsiPort(NonAnsiPortData {
                    expression: None,
                    dot: Some(dot),
                    name: Some(name),
                    open_paren: Some(open_paren),
                    inner,
                    close_paren: Some(close_paren),
                }),
            );
        }
        let expression = if matches!(
            self.tokens.current_kind(),
            TokenKind::Comma | TokenKind::CloseParen
        ) {
            // empty port slot is allowed
            None
        } else {
            Some(self.parse_expression())
        };
        self.finish(
            SyntaxKind::ImplicitNonAnsiPort,
            pos,
            NodeData::NonAnsiPort(NonAnsiPortData {
                expression,
                dot: None,
                name: None,
                open_paren: None,
                inner: None,
                close_paren: None,
            }),
        )
    }

    fn parse_ansi_port(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let direction = if is_direction(self.tokens.current_kind()) {
            Some(self.tokens.consume())
        } else {
            None
        };
        let net_or_var = if is_net_type(self.tokens.current_kind())
            || self.tokens.current_kind() == TokenKind::VarKeyword
        {
            Some(self.tokens.consume())
        } else {
            None
        };
        // `input a` leaves the type implicit; `input mytype a` does not
        let type_node = if self.tokens.current_kind() == TokenKind::Identifier
            && self.tokens.peek_kind(1) != TokenKind::Identifier
        {
            self.implicit_type()
        } else {
            self.parse_data_type(true)
        };
        let name = self.expect_identifier();
        let dimensions = self.parse_dimension_list();
        let initializer = self.parse_equals_value_opt();
        self.finish(
            SyntaxKind::AnsiPort,
            pos,
            NodeData::AnsiPort(AnsiPortData {
                direction,
                net_or_var,
                type_node,
                name,
                dimensions,
                initializer,
            }),
        )
    }

    /// Non-ANSI style `input [7:0] a, b;` declarations in a body.
    fn parse_port_declaration(&mut self, attributes: Vec<NodeIndex>, pos: u32) -> NodeIndex {
        let direction = self.tokens.consume();
        let net_or_var = if is_net_type(self.tokens.current_kind())
            || self.tokens.current_kind() == TokenKind::VarKeyword
        {
            Some(self.tokens.consume())
        } else {
            None
        };
        let type_node = if self.tokens.current_kind() == TokenKind::Identifier
            && self.tokens.peek_kind(1) != TokenKind::Identifier
        {
            self.implicit_type()
        } else {
            self.parse_data_type(true)
        };
        let declarators = self.parse_declarator_list();
        let semicolon = self.expect(TokenKind::Semicolon);
        self.finish(
            SyntaxKind::PortDeclaration,
            pos,
            NodeData::PortDeclaration(PortDeclarationData {
                attributes,
                direction,
                net_or_var,
                type_node,
                declarators,
                semicolon,
            }),
        )
    }

    // ------------------------------------------------------------------
    // Data, net, and misc declarations
    // ------------------------------------------------------------------

    pub(crate) fn parse_data_declaration(
        &mut self,
        attributes: Vec<NodeIndex>,
        pos: u32,
    ) -> NodeIndex {
        let mut modifiers = Vec::new();
        while matches!(
            self.tokens.current_kind(),
            TokenKind::ConstKeyword
                | TokenKind::VarKeyword
                | TokenKind::StaticKeyword
                | TokenKind::AutomaticKeyword
        ) {
            modifiers.push(self.tokens.consume());
        }
        let type_node = self.parse_data_type(!modifiers.is_empty());
        let declarators = self.parse_declarator_list();
        let semicolon = self.expect(TokenKind::Semicolon);
        self.finish(
            SyntaxKind::DataDeclaration,
            pos,
            NodeData::DataDeclaration(DataDeclarationData {
                attributes,
                modifiers,
                type_node,
                declarators,
                semicolon,
            }),
        )
    }

    fn parse_net_declaration(&mut self, attributes: Vec<NodeIndex>, pos: u32) -> NodeIndex {
        let net_type = self.tokens.consume();
        let type_node = if self.tokens.current_kind() == TokenKind::Identifier
            && self.tokens.peek_kind(1) != TokenKind::Identifier
        {
            self.implicit_type()
        } else {
            self.parse_data_type(true)
        };
        let declarators = self.parse_declarator_list();
        let semicolon = self.expect(TokenKind::Semicolon);
        self.finish(
            SyntaxKind::NetDeclaration,
            pos,
            NodeData::NetDeclaration(NetDeclarationData {
                attributes,
                net_type,
                type_node,
                declarators,
                semicolon,
            }),
        )
    }

    pub(crate) fn parse_typedef(&mut self, attributes: Vec<NodeIndex>, pos: u32) -> NodeIndex {
        let keyword = self.expect(TokenKind::TypedefKeyword);
        let type_node = self.parse_data_type(false);
        let name = self.expect_identifier();
        let dimensions = self.parse_dimension_list();
        let semicolon = self.expect(TokenKind::Semicolon);
        self.finish(
            SyntaxKind::TypedefDeclaration,
            pos,
            NodeData::Typedef(TypedefData {
                attributes,
                keyword,
                type_node,
                name,
                dimensions,
                semicolon,
            }),
        )
    }

    pub(crate) fn parse_package_import(
        &mut self,
        attributes: Vec<NodeIndex>,
        pos: u32,
    ) -> NodeIndex {
        let keyword = self.expect(TokenKind::ImportKeyword);
        let items = self.parse_comma_list(|p| p.parse_package_import_item());
        let semicolon = self.expect(TokenKind::Semicolon);
        self.finish(
            SyntaxKind::PackageImportDeclaration,
            pos,
            NodeData::PackageImport(PackageImportData { attributes, keyword, items, semicolon }),
        )
    }

    /// `pkg::name` or `pkg::*`.
    fn parse_package_import_item(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let package = self.expect_identifier();
        let double_colon = self.expect(TokenKind::DoubleColon);
        let item = if self.tokens.current_kind() == TokenKind::Star {
            self.tokens.consume()
        } else {
            self.expect_identifier()
        };
        self.finish(
            SyntaxKind::PackageImportItem,
            pos,
            NodeData::PackageImportItem(PackageImportItemData { package, double_colon, item }),
        )
    }

    fn parse_genvar_declaration(&mut self, attributes: Vec<NodeIndex>, pos: u32) -> NodeIndex {
        let keyword = self.expect(TokenKind::GenvarKeyword);
        let identifiers = self.parse_comma_list(|p| {
            let ipos = p.node_pos();
            let token = p.expect_identifier();
            p.finish(SyntaxKind::IdentifierName, ipos, NodeData::Token(TokenData { token }))
        });
        let semicolon = self.expect(TokenKind::Semicolon);
        self.finish(
            SyntaxKind::GenvarDeclaration,
            pos,
            NodeData::GenvarDeclaration(GenvarDeclarationData {
                attributes,
                keyword,
                identifiers,
                semicolon,
            }),
        )
    }

    /// `timeunit 1ns / 1ps;` or `timeprecision 1ps;`.
    fn parse_timeunits_declaration(&mut self, attributes: Vec<NodeIndex>, pos: u32) -> NodeIndex {
        let keyword = self.tokens.consume();
        let time = self.expect(TokenKind::TimeLiteral);
        let (slash, divider) = if keyword.kind == TokenKind::TimeUnitKeyword
            && self.tokens.current_kind() == TokenKind::Slash
        {
            let slash = self.tokens.consume();
            (Some(slash), Some(self.expect(TokenKind::TimeLiteral)))
        } else {
            (None, None)
        };
        let semicolon = self.expect(TokenKind::Semicolon);
        self.finish(
            SyntaxKind::TimeUnitsDeclaration,
            pos,
            NodeData::TimeUnitsDeclaration(TimeUnitsDeclarationData {
                attributes,
                keyword,
                time,
                slash,
                divider,
                semicolon,
            }),
        )
    }

    fn parse_continuous_assign(&mut self, attributes: Vec<NodeIndex>, pos: u32) -> NodeIndex {
        let keyword = self.expect(TokenKind::AssignKeyword);
        let delay = if self.tokens.current_kind() == TokenKind::Hash {
            Some(self.parse_timing_control())
        } else {
            None
        };
        let assignments = self.parse_comma_list(|p| p.parse_expression());
        let semicolon = self.expect(TokenKind::Semicolon);
        self.finish(
            SyntaxKind::ContinuousAssign,
            pos,
            NodeData::ContinuousAssign(ContinuousAssignData {
                attributes,
                keyword,
                delay,
                assignments,
                semicolon,
            }),
        )
    }

    fn parse_procedural_block(&mut self, attributes: Vec<NodeIndex>, pos: u32) -> NodeIndex {
        let keyword = self.tokens.consume();
        let kind = match keyword.kind {
            TokenKind::InitialKeyword => SyntaxKind::InitialBlock,
            TokenKind::FinalKeyword => SyntaxKind::FinalBlock,
            TokenKind::AlwaysCombKeyword => SyntaxKind::AlwaysCombBlock,
            TokenKind::AlwaysFfKeyword => SyntaxKind::AlwaysFfBlock,
            TokenKind::AlwaysLatchKeyword => SyntaxKind::AlwaysLatchBlock,
            _ => SyntaxKind::AlwaysBlock,
        };
        let statement = self.parse_statement();
        self.finish(
            kind,
            pos,
            NodeData::ProceduralBlock(ProceduralBlockData {
                attributes,
                keyword,
                statement,
            }),
        )
    }

    // ------------------------------------------------------------------
    // Generate constructs
    // ------------------------------------------------------------------

    fn parse_generate_region(&mut self, attributes: Vec<NodeIndex>, pos: u32) -> NodeIndex {
        let keyword = self.expect(TokenKind::GenerateKeyword);
        let members = self.parse_member_list(&[TokenKind::EndGenerateKeyword]);
        let end_keyword = self.expect(TokenKind::EndGenerateKeyword);
        self.finish(
            SyntaxKind::GenerateRegion,
            pos,
            NodeData::GenerateRegion(GenerateRegionData {
                attributes,
                keyword,
                members,
                end_keyword,
            }),
        )
    }

    fn parse_loop_generate(&mut self, attributes: Vec<NodeIndex>, pos: u32) -> NodeIndex {
        let for_keyword = self.expect(TokenKind::ForKeyword);
        let open_paren = self.expect(TokenKind::OpenParen);
        let genvar_keyword = self.consume_if(TokenKind::GenvarKeyword);
        let identifier = self.expect_identifier();
        let equals = self.expect(TokenKind::Equals);
        let initial_expr = self.parse_expression();
        let semi1 = self.expect(TokenKind::Semicolon);
        let condition = self.parse_expression();
        let semi2 = self.expect(TokenKind::Semicolon);
        let iteration_expr = self.parse_expression();
        let close_paren = self.expect(TokenKind::CloseParen);
        let block = self.parse_generate_block();
        self.finish(
            SyntaxKind::LoopGenerate,
            pos,
            NodeData::LoopGenerate(LoopGenerateData {
                attributes,
                for_keyword,
                open_paren,
                genvar_keyword,
                identifier,
                equals,
                initial_expr,
                semi1,
                condition,
                semi2,
                iteration_expr,
                close_paren,
                block,
            }),
        )
    }

    fn parse_if_generate(&mut self, attributes: Vec<NodeIndex>, pos: u32) -> NodeIndex {
        let if_keyword = self.expect(TokenKind::IfKeyword);
        let open_paren = self.expect(TokenKind::OpenParen);
        let condition = self.parse_expression();
        let close_paren = self.expect(TokenKind::CloseParen);
        let block = self.parse_generate_block();
        let else_clause = self.parse_else_clause_opt(|p| p.parse_generate_block());
        self.finish(
            SyntaxKind::IfGenerate,
            pos,
            NodeData::IfGenerate(IfGenerateData {
                attributes,
                if_keyword,
                open_paren,
                condition,
                close_paren,
                block,
                else_clause,
            }),
        )
    }

    fn parse_case_generate(&mut self, attributes: Vec<NodeIndex>, pos: u32) -> NodeIndex {
        let keyword = self.expect(TokenKind::CaseKeyword);
        let open_paren = self.expect(TokenKind::OpenParen);
        let condition = self.parse_expression();
        let close_paren = self.expect(TokenKind::CloseParen);
        let mut items = Vec::new();
        while !self.tokens.at_end() && self.tokens.current_kind() != TokenKind::EndCaseKeyword {
            let before = self.tokens.position();
            if let Some(item) = self.parse_case_item(|p| p.parse_generate_block()) {
                items.push(item);
            }
            if self.tokens.position() == before {
                self.error_at_current(diagnostic_codes::EXPECTED_CASE_ITEM, &[]);
                self.tokens.consume();
            }
        }
        let end_keyword = self.expect(TokenKind::EndCaseKeyword);
        self.finish(
            SyntaxKind::CaseGenerate,
            pos,
            NodeData::CaseGenerate(CaseGenerateData {
                attributes,
                keyword,
                open_paren,
                condition,
                close_paren,
                items,
                end_keyword,
            }),
        )
    }

    fn parse_generate_block(&mut self) -> NodeIndex {
        if self.tokens.current_kind() != TokenKind::BeginKeyword {
            return self.parse_member_entry();
        }
        let pos = self.node_pos();
        let begin_keyword = self.tokens.consume();
        let block_name = self.parse_named_block_clause_opt();
        let members = self.parse_member_list(&[TokenKind::EndKeyword]);
        let end_keyword = self.expect(TokenKind::EndKeyword);
        let end_name = self.parse_named_block_clause_opt();
        self.finish(
            SyntaxKind::GenerateBlock,
            pos,
            NodeData::GenerateBlock(GenerateBlockData {
                begin_keyword,
                block_name,
                members,
                end_keyword,
                end_name,
            }),
        )
    }

    // ------------------------------------------------------------------
    // Hierarchy instantiation
    // ------------------------------------------------------------------

    fn parse_hierarchy_instantiation(
        &mut self,
        attributes: Vec<NodeIndex>,
        pos: u32,
    ) -> NodeIndex {
        let type_name = self.expect_identifier();
        let parameters = if self.tokens.current_kind() == TokenKind::Hash {
            let ppos = self.node_pos();
            let hash = self.tokens.consume();
            let arguments = self.parse_argument_list();
            Some(self.finish(
                SyntaxKind::ParameterValueAssignment,
                ppos,
                NodeData::ParamValueAssign(ParamValueAssignData { hash, arguments }),
            ))
        } else {
            None
        };
        let instances = self.parse_comma_list(|p| p.parse_hierarchical_instance());
        let semicolon = self.expect(TokenKind::Semicolon);
        self.finish(
            SyntaxKind::HierarchyInstantiation,
            pos,
            NodeData::HierarchyInstantiation(HierarchyInstantiationData {
                attributes,
                type_name,
                parameters,
                instances,
                semicolon,
            }),
        )
    }

    fn parse_hierarchical_instance(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let name = self.expect_identifier();
        let dimensions = self.parse_dimension_list();
        let open_paren = self.expect(TokenKind::OpenParen);
        let connections = if self.tokens.current_kind() == TokenKind::CloseParen {
            SeparatedList::new()
        } else {
            self.parse_comma_list(|p| p.parse_port_connection())
        };
        let close_paren = self.expect(TokenKind::CloseParen);
        self.finish(
            SyntaxKind::HierarchicalInstance,
            pos,
            NodeData::HierarchicalInstance(HierarchicalInstanceData {
                name,
                dimensions,
                open_paren,
                connections,
                close_paren,
            }),
        )
    }

    fn parse_port_connection(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        match self.tokens.current_kind() {
            TokenKind::DotStar => {
                let dot_star = self.tokens.consume();
                self.finish(
                    SyntaxKind::WildcardPortConnection,
                    pos,
                    NodeData::PortConnection(PortConnectionData {
                        expression: None,
                        dot: None,
                        name: None,
                        open_paren: None,
                        inner: None,
                        close_paren: None,
                        dot_star: Some(dot_star),
                    }),
                )
            }
            TokenKind::Dot => {
                let dot = self.tokens.consume();
                let name = self.expect_identifier();
                let (open_paren, inner, close_paren) =
                    if self.tokens.current_kind() == TokenKind::OpenParen {
                        let open = self.tokens.consume();
                        let inner = if self.tokens.current_kind() == TokenKind::CloseParen {
                            None
                        } else {
                            Some(self.parse_expression())
                        };
                        let close = self.expect(TokenKind::CloseParen);
                        (Some(open), inner, Some(close))
                    } else {
                        (None, None, None)
                    };
                self.finish(
                    SyntaxKind::NamedPortConnection,
                    pos,
                    NodeData::PortConnection(PortConnectionData {
                        expression: None,
                        dot: Some(dot),
                        name: Some(name),
                        open_paren,
                        inner,
                        close_paren,
                        dot_star: None,
                    }),
                )
            }
            _ => {
                let expression = if matches!(
                    self.tokens.current_kind(),
                    TokenKind::Comma | TokenKind::CloseParen
                ) {
                    None
                } else {
                    Some(self.parse_expression())
                };
                self.finish(
                    SyntaxKind::OrderedPortConnection,
                    pos,
                    NodeData::PortConnection(PortConnectionData {
                        expression,
                        dot: None,
                        name: None,
                        open_paren: None,
                        inner: None,
                        close_paren: None,
                        dot_star: None,
                    }),
                )
            }
        }
    }

    // ------------------------------------------------------------------
    // Subroutines
    // ------------------------------------------------------------------

    pub(crate) fn parse_function_declaration(
        &mut self,
        attributes: Vec<NodeIndex>,
        pos: u32,
    ) -> NodeIndex {
        let prototype = self.parse_function_prototype();
        let proto_keyword = match &self.arena.get(prototype).data {
            NodeData::FunctionPrototype(p) => p.keyword.kind,
            _ => TokenKind::FunctionKeyword,
        };
        let (kind, end_kind) = if proto_keyword == TokenKind::TaskKeyword {
            (SyntaxKind::TaskDeclaration, TokenKind::EndTaskKeyword)
        } else {
            (SyntaxKind::FunctionDeclaration, TokenKind::EndFunctionKeyword)
        };
        let items = self.parse_block_items(&[end_kind]);
        let end_keyword = self.expect(end_kind);
        let end_name = self.parse_named_block_clause_opt();
        self.finish(
            kind,
            pos,
            NodeData::FunctionDeclaration(FunctionDeclarationData {
                attributes,
                prototype,
                items,
                end_keyword,
                end_name,
            }),
        )
    }

    fn parse_function_prototype(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let keyword = self.tokens.consume();
        let lifetime = self.parse_lifetime_opt();
        let return_type = if keyword.kind == TokenKind::FunctionKeyword {
            self.parse_function_return_type()
        } else {
            None
        };
        let name = self.parse_name();
        let ports = if self.tokens.current_kind() == TokenKind::OpenParen {
            Some(self.parse_subroutine_port_list())
        } else {
            None
        };
        let semicolon = self.expect(TokenKind::Semicolon);
        self.finish(
            SyntaxKind::FunctionPrototype,
            pos,
            NodeData::FunctionPrototype(FunctionPrototypeData {
                keyword,
                lifetime,
                return_type,
                name,
                ports,
                semicolon,
            }),
        )
    }

    /// `function foo(...)` has an implicit return type while
    /// `function mytype foo(...)` names one; a scan decides which.
    fn parse_function_return_type(&mut self) -> Option<NodeIndex> {
        match self.tokens.current_kind() {
            TokenKind::Identifier => {
                if self.is_variable_declaration() {
                    Some(self.parse_data_type(false))
                } else {
                    None
                }
            }
            TokenKind::SignedKeyword | TokenKind::UnsignedKeyword | TokenKind::OpenBracket => {
                Some(self.parse_data_type(true))
            }
            kind if is_data_type_start(kind) => Some(self.parse_data_type(false)),
            _ => None,
        }
    }

    fn parse_subroutine_port_list(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let open_paren = self.expect(TokenKind::OpenParen);
        let ports = if self.tokens.current_kind() == TokenKind::CloseParen {
            SeparatedList::new()
        } else {
            self.parse_comma_list(|p| p.parse_ansi_port())
        };
        let close_paren = self.expect(TokenKind::CloseParen);
        self.finish(
            SyntaxKind::AnsiPortList,
            pos,
            NodeData::PortList(PortListData { open_paren, ports, close_paren }),
        )
    }

    // ------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------

    fn parse_class_declaration(
        &mut self,
        attributes: Vec<NodeIndex>,
        pos: u32,
        virtual_keyword: Option<Token>,
    ) -> NodeIndex {
        let class_keyword = self.expect(TokenKind::ClassKeyword);
        let lifetime = self.parse_lifetime_opt();
        let name = self.expect_identifier();
        let parameter_ports = if self.tokens.current_kind() == TokenKind::Hash
            && self.tokens.peek_kind(1) == TokenKind::OpenParen
        {
            Some(self.parse_parameter_port_list())
        } else {
            None
        };
        let extends_clause = match self.consume_if(TokenKind::ExtendsKeyword) {
            Some(keyword) => {
                let epos = keyword.full_start;
                let base_name = self.parse_name();
                let arguments = if self.tokens.current_kind() == TokenKind::OpenParen {
                    Some(self.parse_argument_list())
                } else {
                    None
                };
                Some(self.finish(
                    SyntaxKind::ExtendsClause,
                    epos,
                    NodeData::ExtendsClause(ExtendsClauseData { keyword, base_name, arguments }),
                ))
            }
            None => None,
        };
        let implements_clause = match self.consume_if(TokenKind::ImplementsKeyword) {
            Some(keyword) => {
                let ipos = keyword.full_start;
                let names = self.parse_comma_list(|p| p.parse_name());
                Some(self.finish(
                    SyntaxKind::ImplementsClause,
                    ipos,
                    NodeData::ImplementsClause(ImplementsClauseData { keyword, names }),
                ))
            }
            None => None,
        };
        let semicolon = self.expect(TokenKind::Semicolon);

        let mut members = Vec::new();
        while !self.tokens.at_end() && self.tokens.current_kind() != TokenKind::EndClassKeyword {
            let before = self.tokens.position();
            if let Some(member) = self.parse_class_member() {
                members.push(member);
            }
            if self.tokens.position() == before {
                self.error_at_current(diagnostic_codes::EXPECTED_CLASS_MEMBER, &[]);
                self.tokens.consume();
            }
        }
        let end_keyword = self.expect(TokenKind::EndClassKeyword);
        let end_name = self.parse_named_block_clause_opt();
        self.finish(
            SyntaxKind::ClassDeclaration,
            pos,
            NodeData::ClassDeclaration(ClassDeclarationData {
                attributes,
                virtual_keyword,
                class_keyword,
                lifetime,
                name,
                parameter_ports,
                extends_clause,
                implements_clause,
                semicolon,
                members,
                end_keyword,
                end_name,
            }),
        )
    }

    fn parse_class_member(&mut self) -> Option<NodeIndex> {
        use TokenKind::*;
        let pos = self.node_pos();
        let attributes = self.parse_attributes();

        let mut qualifiers = Vec::new();
        loop {
            match self.tokens.current_kind() {
                LocalKeyword | ProtectedKeyword | StaticKeyword | PureKeyword | RandKeyword
                | RandCKeyword => qualifiers.push(self.tokens.consume()),
                ConstKeyword if self.tokens.peek_kind(1) != ClassKeyword => {
                    qualifiers.push(self.tokens.consume());
                }
                VirtualKeyword
                    if matches!(self.tokens.peek_kind(1), FunctionKeyword | TaskKeyword) =>
                {
                    qualifiers.push(self.tokens.consume());
                }
                _ => break,
            }
        }

        let member = match self.tokens.current_kind() {
            FunctionKeyword | TaskKeyword => {
                let declaration = self.parse_function_declaration(attributes, self.node_pos());
                self.finish(
                    SyntaxKind::ClassMethodDeclaration,
                    pos,
                    NodeData::ClassMethod(ClassMethodData { qualifiers, declaration }),
                )
            }
            ConstraintKeyword => self.parse_constraint_declaration(qualifiers, pos),
            TypedefKeyword => self.parse_typedef(attributes, pos),
            ImportKeyword => self.parse_package_import(attributes, pos),
            ParameterKeyword | LocalParamKeyword => {
                self.parse_parameter_declaration(attributes, pos, true)
            }
            ClassKeyword => self.parse_class_declaration(attributes, pos, None),
            Semicolon => {
                let semicolon = self.tokens.consume();
                self.finish(
                    SyntaxKind::EmptyMember,
                    pos,
                    NodeData::EmptyMember(EmptyMemberData { attributes, semicolon }),
                )
            }
            Identifier if qualifiers.is_empty() && attributes.is_empty() => {
                if self.is_variable_declaration() {
                    let declaration = self.parse_data_declaration(attributes, self.node_pos());
                    self.finish(
                        SyntaxKind::ClassPropertyDeclaration,
                        pos,
                        NodeData::ClassProperty(ClassPropertyData { qualifiers, declaration }),
                    )
                } else {
                    return None;
                }
            }
            kind if is_data_type_start(kind)
                || matches!(kind, Identifier | ConstKeyword | VarKeyword) =>
            {
                let declaration = self.parse_data_declaration(attributes, self.node_pos());
                self.finish(
                    SyntaxKind::ClassPropertyDeclaration,
                    pos,
                    NodeData::ClassProperty(ClassPropertyData { qualifiers, declaration }),
                )
            }
            _ => {
                if qualifiers.is_empty() && attributes.is_empty() {
                    return None;
                }
                self.error_at_current(diagnostic_codes::EXPECTED_CLASS_MEMBER, &[]);
                let semicolon = Token::missing(TokenKind::Semicolon, self.tokens.prev_token_end());
                self.finish(
                    SyntaxKind::EmptyMember,
                    pos,
                    NodeData::EmptyMember(EmptyMemberData { attributes, semicolon }),
                )
            }
        };
        Some(member)
    }

    // ------------------------------------------------------------------
    // Constraints
    // ------------------------------------------------------------------

    fn parse_constraint_declaration(
        &mut self,
        qualifiers: Vec<Token>,
        pos: u32,
    ) -> NodeIndex {
        let keyword = self.expect(TokenKind::ConstraintKeyword);
        let name = self.expect_identifier();
        let block = self.parse_constraint_block();
        self.finish(
            SyntaxKind::ConstraintDeclaration,
            pos,
            NodeData::ConstraintDeclaration(ConstraintDeclarationData {
                qualifiers,
                keyword,
                name,
                block,
            }),
        )
    }

    fn parse_constraint_block(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let open_brace = self.expect(TokenKind::OpenBrace);
        let mut items = Vec::new();
        while !self.tokens.at_end() && self.tokens.current_kind() != TokenKind::CloseBrace {
            let before = self.tokens.position();
            if let Some(item) = self.parse_constraint_item() {
                items.push(item);
            }
            if self.tokens.position() == before {
                self.error_at_current(diagnostic_codes::EXPECTED_CONSTRAINT_ITEM, &[]);
                self.tokens.consume();
            }
        }
        let close_brace = self.expect(TokenKind::CloseBrace);
        self.finish(
            SyntaxKind::ConstraintBlock,
            pos,
            NodeData::ConstraintBlock(ConstraintBlockData { open_brace, items, close_brace }),
        )
    }

    fn parse_constraint_item(&mut self) -> Option<NodeIndex> {
        let pos = self.node_pos();
        match self.tokens.current_kind() {
            TokenKind::IfKeyword => {
                let if_keyword = self.tokens.consume();
                let open_paren = self.expect(TokenKind::OpenParen);
                let condition = self.parse_expression();
                let close_paren = self.expect(TokenKind::CloseParen);
                let constraints = self.parse_constraint_set();
                let else_clause = self.parse_else_clause_opt(|p| p.parse_constraint_set());
                Some(self.finish(
                    SyntaxKind::ConditionalConstraint,
                    pos,
                    NodeData::ConditionalConstraint(ConditionalConstraintData {
                        if_keyword,
                        open_paren,
                        condition,
                        close_paren,
                        constraints,
                        else_clause,
                    }),
                ))
            }
            TokenKind::UniqueKeyword => {
                let keyword = self.tokens.consume();
                let ranges = self.parse_open_range_list();
                let semicolon = self.expect(TokenKind::Semicolon);
                Some(self.finish(
                    SyntaxKind::UniquenessConstraint,
                    pos,
                    NodeData::UniquenessConstraint(UniquenessConstraintData {
                        keyword,
                        ranges,
                        semicolon,
                    }),
                ))
            }
            TokenKind::OpenBrace => Some(self.parse_constraint_set()),
            kind if is_possible_expression(kind) => {
                // stop below `->` so implication stays visible here
                let expression = self.parse_sub_expression(
                    ExpressionOptions::empty(),
                    CONDITIONAL_PRECEDENCE,
                );
                if let Some(arrow) = self.consume_if(TokenKind::MinusArrow) {
                    let constraints = self.parse_constraint_set();
                    return Some(self.finish(
                        SyntaxKind::ImplicationConstraint,
                        pos,
                        NodeData::ImplicationConstraint(ImplicationConstraintData {
                            left: expression,
                            arrow,
                            constraints,
                        }),
                    ));
                }
                let semicolon = self.expect(TokenKind::Semicolon);
                Some(self.finish(
                    SyntaxKind::ExpressionConstraint,
                    pos,
                    NodeData::ExpressionConstraint(ExpressionConstraintData {
                        expression,
                        semicolon,
                    }),
                ))
            }
            _ => None,
        }
    }

    /// A single constraint item or a braced set of them.
    fn parse_constraint_set(&mut self) -> NodeIndex {
        if self.tokens.current_kind() != TokenKind::OpenBrace {
            return match self.parse_constraint_item() {
                Some(item) => item,
                None => {
                    self.error_at_current(diagnostic_codes::EXPECTED_CONSTRAINT_ITEM, &[]);
                    let pos = self.node_pos();
                    let expression = self.bad_expression();
                    let semicolon =
                        Token::missing(TokenKind::Semicolon, self.tokens.prev_token_end());
                    self.finish(
                        SyntaxKind::ExpressionConstraint,
                        pos,
                        NodeData::ExpressionConstraint(ExpressionConstraintData {
                            expression,
                            semicolon,
                        }),
                    )
                }
            };
        }
        let pos = self.node_pos();
        let open_brace = self.tokens.consume();
        let mut items = Vec::new();
        while !self.tokens.at_end() && self.tokens.current_kind() != TokenKind::CloseBrace {
            let before = self.tokens.position();
            if let Some(item) = self.parse_constraint_item() {
                items.push(item);
            }
            if self.tokens.position() == before {
                self.error_at_current(diagnostic_codes::EXPECTED_CONSTRAINT_ITEM, &[]);
                self.tokens.consume();
            }
        }
        let close_brace = self.expect(TokenKind::CloseBrace);
        self.finish(
            SyntaxKind::ConstraintSet,
            pos,
            NodeData::ConstraintBlock(ConstraintBlockData { open_brace, items, close_brace }),
        )
    }
}
