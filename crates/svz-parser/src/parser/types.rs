//! Data type parsing: built-in integer and real types, enums, packed
//! structs and unions, named types, and the implicit type that ANSI ports
//! and parameter declarations allow.

use svz_common::diagnostics::diagnostic_codes;
use svz_scanner::TokenKind;

use crate::node::{
    EnumTypeData, ImplicitTypeData, IntegerTypeData, NamedTypeData, NodeData, NodeIndex,
    StructUnionMemberData, StructUnionTypeData, SyntaxKind, TokenData,
};

use super::Parser;

/// Token kinds that unambiguously begin a data type.
pub(crate) fn is_data_type_start(kind: TokenKind) -> bool {
    use TokenKind::*;
    matches!(
        kind,
        BitKeyword
            | LogicKeyword
            | RegKeyword
            | ByteKeyword
            | ShortIntKeyword
            | IntKeyword
            | LongIntKeyword
            | IntegerKeyword
            | TimeKeyword
            | RealKeyword
            | ShortRealKeyword
            | RealTimeKeyword
            | StringKeyword
            | CHandleKeyword
            | EventKeyword
            | VoidKeyword
            | EnumKeyword
            | StructKeyword
            | UnionKeyword
    )
}

impl Parser<'_> {
    /// Parse a data type. With `allow_implicit`, a missing type produces a
    /// zero-width `ImplicitType` node and no diagnostic; `signed`/`[...]`
    /// alone also form an implicit type.
    pub(crate) fn parse_data_type(&mut self, allow_implicit: bool) -> NodeIndex {
        use TokenKind::*;
        let pos = self.node_pos();
        match self.tokens.current_kind() {
            BitKeyword | LogicKeyword | RegKeyword => {
                let keyword = self.tokens.consume();
                let signing = self.parse_signing_opt();
                let dimensions = self.parse_dimension_list();
                self.finish(
                    SyntaxKind::IntegerType,
                    pos,
                    NodeData::IntegerType(IntegerTypeData { keyword, signing, dimensions }),
                )
            }
            ByteKeyword | ShortIntKeyword | IntKeyword | LongIntKeyword | IntegerKeyword
            | TimeKeyword => {
                let keyword = self.tokens.consume();
                let signing = self.parse_signing_opt();
                self.finish(
                    SyntaxKind::IntegerType,
                    pos,
                    NodeData::IntegerType(IntegerTypeData { keyword, signing, dimensions: Vec::new() }),
                )
            }
            RealKeyword | ShortRealKeyword | RealTimeKeyword | StringKeyword | CHandleKeyword
            | EventKeyword | VoidKeyword => {
                let token = self.tokens.consume();
                self.finish(SyntaxKind::KeywordType, pos, NodeData::KeywordType(TokenData { token }))
            }
            EnumKeyword => self.parse_enum_type(),
            StructKeyword | UnionKeyword => self.parse_struct_union_type(),
            Identifier => {
                let name = self.parse_name();
                self.finish(SyntaxKind::NamedType, pos, NodeData::NamedType(NamedTypeData { name }))
            }
            SignedKeyword | UnsignedKeyword => {
                let signing = Some(self.tokens.consume());
                let dimensions = self.parse_dimension_list();
                self.finish(
                    SyntaxKind::ImplicitType,
                    pos,
                    NodeData::ImplicitType(ImplicitTypeData { signing, dimensions }),
                )
            }
            OpenBracket if allow_implicit => {
                let dimensions = self.parse_dimension_list();
                self.finish(
                    SyntaxKind::ImplicitType,
                    pos,
                    NodeData::ImplicitType(ImplicitTypeData { signing: None, dimensions }),
                )
            }
            _ => {
                if !allow_implicit {
                    self.error_at_current(diagnostic_codes::EXPECTED_DATA_TYPE, &[]);
                }
                self.implicit_type()
            }
        }
    }

    /// Zero-width implicit type at the current position.
    pub(crate) fn implicit_type(&mut self) -> NodeIndex {
        let p = self.tokens.prev_token_end();
        self.arena.alloc(
            SyntaxKind::ImplicitType,
            p,
            p,
            NodeData::ImplicitType(ImplicitTypeData { signing: None, dimensions: Vec::new() }),
        )
    }

    fn parse_signing_opt(&mut self) -> Option<svz_scanner::Token> {
        match self.tokens.current_kind() {
            TokenKind::SignedKeyword | TokenKind::UnsignedKeyword => Some(self.tokens.consume()),
            _ => None,
        }
    }

    /// `enum [base_type] { name [= expr], ... } {dimension}`
    fn parse_enum_type(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let keyword = self.expect(TokenKind::EnumKeyword);
        let base_type = if self.tokens.current_kind() == TokenKind::OpenBrace {
            None
        } else {
            Some(self.parse_data_type(false))
        };
        let open_brace = self.expect(TokenKind::OpenBrace);
        let members = self.parse_declarator_list();
        let close_brace = self.expect(TokenKind::CloseBrace);
        let dimensions = self.parse_dimension_list();
        self.finish(
            SyntaxKind::EnumType,
            pos,
            NodeData::EnumType(EnumTypeData {
                keyword,
                base_type,
                open_brace,
                members,
                close_brace,
                dimensions,
            }),
        )
    }

    /// `struct|union [packed [signing]] { member; ... } {dimension}`
    fn parse_struct_union_type(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let keyword = self.tokens.consume();
        let kind = if keyword.kind == TokenKind::StructKeyword {
            SyntaxKind::StructType
        } else {
            SyntaxKind::UnionType
        };
        let packed = self.consume_if(TokenKind::PackedKeyword);
        let signing = self.parse_signing_opt();
        let open_brace = self.expect(TokenKind::OpenBrace);
        let mut members = Vec::new();
        while !self.tokens.at_end() && self.tokens.current_kind() != TokenKind::CloseBrace {
            let before = self.tokens.position();
            members.push(self.parse_struct_union_member());
            if self.tokens.position() == before {
                self.error_at_current(diagnostic_codes::EXPECTED_DATA_TYPE, &[]);
                self.tokens.consume();
            }
        }
        let close_brace = self.expect(TokenKind::CloseBrace);
        let dimensions = self.parse_dimension_list();
        self.finish(
            kind,
            pos,
            NodeData::StructUnionType(StructUnionTypeData {
                keyword,
                packed,
                signing,
                open_brace,
                members,
                close_brace,
                dimensions,
            }),
        )
    }

    fn parse_struct_union_member(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let type_node = self.parse_data_type(false);
        let declarators = self.parse_declarator_list();
        let semicolon = self.expect(TokenKind::Semicolon);
        self.finish(
            SyntaxKind::StructUnionMember,
            pos,
            NodeData::StructUnionMember(StructUnionMemberData { type_node, declarators, semicolon }),
        )
    }
}
