//! Procedural statement parsing, timing controls, and event expressions.

use svz_common::diagnostics::diagnostic_codes;
use svz_scanner::{Token, TokenKind};

use crate::node::{
    ActionBlockData, AssertionStatementData, BinaryEventData, BlockStatementData, CaseItemData,
    CaseStatementData, ConditionalStatementData, DelayControlData, DisableStatementData,
    DoWhileData, ElseClauseData, EmptyStatementData, EventControlData, EventTriggerData,
    ExpressionStatementData, ForLoopData, ForVariableDeclData, ForeachLoopData, IffClauseData,
    ImplicitEventData, JumpStatementData, LoopStatementData, NamedLabelData, NodeData, NodeIndex,
    ParenthesizedData, ProceduralAssignData, ReturnStatementData, SeparatedList, SignalEventData,
    SyntaxKind, TimingStatementData, TokenData, WaitForkData, WaitOrderData, WaitStatementData,
};

use super::expressions::{is_possible_expression, ExpressionOptions};
use super::types::is_data_type_start;
use super::Parser;

impl Parser<'_> {
    /// Parse one statement. Total: always returns a node and, when the
    /// current token cannot start a statement, consumes it so callers
    /// make progress.
    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_nested() {
            self.exit_nested();
            let bad = self.bad_expression();
            let semicolon = Token::missing(TokenKind::Semicolon, self.tokens.prev_token_end());
            let pos = self.arena.get(bad).pos;
            return self.finish(
                SyntaxKind::ExpressionStatement,
                pos,
                NodeData::ExpressionStatement(ExpressionStatementData {
                    label: None,
                    attributes: Vec::new(),
                    expression: bad,
                    semicolon,
                }),
            );
        }
        let result = self.parse_statement_inner();
        self.exit_nested();
        result
    }

    fn parse_statement_inner(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let label = self.parse_statement_label_opt();
        let attributes = self.parse_attributes();
        self.parse_statement_item(pos, label, attributes)
    }

    fn parse_statement_label_opt(&mut self) -> Option<NodeIndex> {
        if self.tokens.current_kind() != TokenKind::Identifier
            || self.tokens.peek_kind(1) != TokenKind::Colon
        {
            return None;
        }
        let pos = self.node_pos();
        let name = self.tokens.consume();
        let colon = self.tokens.consume();
        Some(self.finish(
            SyntaxKind::NamedLabel,
            pos,
            NodeData::NamedLabel(NamedLabelData { name, colon }),
        ))
    }

    fn parse_statement_item(
        &mut self,
        pos: u32,
        label: Option<NodeIndex>,
        attributes: Vec<NodeIndex>,
    ) -> NodeIndex {
        use TokenKind::*;
        match self.tokens.current_kind() {
            UniqueKeyword | Unique0Keyword | PriorityKeyword => {
                let check = self.tokens.consume();
                match self.tokens.current_kind() {
                    CaseKeyword | CaseXKeyword | CaseZKeyword => {
                        self.parse_case_statement(pos, label, attributes, Some(check), false)
                    }
                    _ => self.parse_conditional_statement(pos, label, attributes, Some(check)),
                }
            }
            IfKeyword => self.parse_conditional_statement(pos, label, attributes, None),
            CaseKeyword | CaseXKeyword | CaseZKeyword => {
                self.parse_case_statement(pos, label, attributes, None, false)
            }
            RandCaseKeyword => self.parse_case_statement(pos, label, attributes, None, true),
            ForKeyword => self.parse_for_loop(pos, label, attributes),
            ForeachKeyword => self.parse_foreach_loop(pos, label, attributes),
            WhileKeyword | RepeatKeyword => {
                let keyword = self.tokens.consume();
                let open_paren = self.expect(OpenParen);
                let expression = self.parse_expression();
                let close_paren = self.expect(CloseParen);
                let statement = self.parse_statement();
                let kind = if keyword.kind == WhileKeyword {
                    SyntaxKind::WhileStatement
                } else {
                    SyntaxKind::RepeatStatement
                };
                self.finish(
                    kind,
                    pos,
                    NodeData::Loop(LoopStatementData {
                        label,
                        attributes,
                        keyword,
                        open_paren: Some(open_paren),
                        expression: Some(expression),
                        close_paren: Some(close_paren),
                        statement,
                    }),
                )
            }
            ForeverKeyword => {
                let keyword = self.tokens.consume();
                let statement = self.parse_statement();
                self.finish(
                    SyntaxKind::ForeverStatement,
                    pos,
                    NodeData::Loop(LoopStatementData {
                        label,
                        attributes,
                        keyword,
                        open_paren: None,
                        expression: None,
                        close_paren: None,
                        statement,
                    }),
                )
            }
            DoKeyword => self.parse_do_while(pos, label, attributes),
            ReturnKeyword => {
                let keyword = self.tokens.consume();
                let expression = if self.tokens.current_kind() == Semicolon {
                    None
                } else {
                    Some(self.parse_expression())
                };
                let semicolon = self.expect(Semicolon);
                self.finish(
                    SyntaxKind::ReturnStatement,
                    pos,
                    NodeData::Return(ReturnStatementData {
                        label,
                        attributes,
                        keyword,
                        expression,
                        semicolon,
                    }),
                )
            }
            BreakKeyword | ContinueKeyword => {
                let keyword = self.tokens.consume();
                let semicolon = self.expect(Semicolon);
                let kind = if keyword.kind == BreakKeyword {
                    SyntaxKind::BreakStatement
                } else {
                    SyntaxKind::ContinueStatement
                };
                self.finish(
                    kind,
                    pos,
                    NodeData::Jump(JumpStatementData { label, attributes, keyword, semicolon }),
                )
            }
            DisableKeyword => {
                let keyword = self.tokens.consume();
                if let Some(fork_keyword) = self.consume_if(ForkKeyword) {
                    let semicolon = self.expect(Semicolon);
                    return self.finish(
                        SyntaxKind::DisableForkStatement,
                        pos,
                        NodeData::Disable(DisableStatementData {
                            label,
                            attributes,
                            keyword,
                            fork_keyword: Some(fork_keyword),
                            name: None,
                            semicolon,
                        }),
                    );
                }
                let name = self.parse_name();
                let semicolon = self.expect(Semicolon);
                self.finish(
                    SyntaxKind::DisableStatement,
                    pos,
                    NodeData::Disable(DisableStatementData {
                        label,
                        attributes,
                        keyword,
                        fork_keyword: None,
                        name: Some(name),
                        semicolon,
                    }),
                )
            }
            AssignKeyword | ForceKeyword | DeassignKeyword | ReleaseKeyword => {
                let keyword = self.tokens.consume();
                let expression = self.parse_expression();
                let semicolon = self.expect(Semicolon);
                let kind = match keyword.kind {
                    AssignKeyword => SyntaxKind::ProceduralAssignStatement,
                    ForceKeyword => SyntaxKind::ProceduralForceStatement,
                    DeassignKeyword => SyntaxKind::ProceduralDeassignStatement,
                    _ => SyntaxKind::ProceduralReleaseStatement,
                };
                self.finish(
                    kind,
                    pos,
                    NodeData::ProceduralAssign(ProceduralAssignData {
                        label,
                        attributes,
                        keyword,
                        expression,
                        semicolon,
                    }),
                )
            }
            AssertKeyword | AssumeKeyword | CoverKeyword => {
                self.parse_assertion_statement(pos, label, attributes)
            }
            Hash | At => {
                let timing_control = self.parse_timing_control();
                let statement = self.parse_statement();
                self.finish(
                    SyntaxKind::TimingControlStatement,
                    pos,
                    NodeData::TimingStatement(TimingStatementData {
                        label,
                        attributes,
                        timing_control,
                        statement,
                    }),
                )
            }
            MinusArrow => {
                let arrow = self.tokens.consume();
                let name = self.parse_name();
                let semicolon = self.expect(Semicolon);
                self.finish(
                    SyntaxKind::BlockingEventTriggerStatement,
                    pos,
                    NodeData::EventTrigger(EventTriggerData {
                        label,
                        attributes,
                        arrow,
                        name,
                        semicolon,
                    }),
                )
            }
            WaitKeyword => self.parse_wait_statement(pos, label, attributes),
            WaitOrderKeyword => self.parse_wait_order(pos, label, attributes),
            BeginKeyword => self.parse_block(pos, label, attributes, false),
            ForkKeyword => self.parse_block(pos, label, attributes, true),
            Semicolon => {
                let semicolon = self.tokens.consume();
                self.finish(
                    SyntaxKind::EmptyStatement,
                    pos,
                    NodeData::EmptyStatement(EmptyStatementData { label, attributes, semicolon }),
                )
            }
            kind if is_possible_expression(kind) => {
                let expression =
                    self.parse_sub_expression(ExpressionOptions::PROCEDURAL_ASSIGNMENT, 0);
                let semicolon = self.expect(Semicolon);
                self.finish(
                    SyntaxKind::ExpressionStatement,
                    pos,
                    NodeData::ExpressionStatement(ExpressionStatementData {
                        label,
                        attributes,
                        expression,
                        semicolon,
                    }),
                )
            }
            _ => {
                self.error_at_current(diagnostic_codes::EXPECTED_STATEMENT, &[]);
                let expression = if self.tokens.at_end() {
                    self.bad_expression()
                } else {
                    self.bad_expression_consuming()
                };
                let semicolon = Token::missing(TokenKind::Semicolon, self.tokens.prev_token_end());
                self.finish(
                    SyntaxKind::ExpressionStatement,
                    pos,
                    NodeData::ExpressionStatement(ExpressionStatementData {
                        label,
                        attributes,
                        expression,
                        semicolon,
                    }),
                )
            }
        }
    }

    // ------------------------------------------------------------------
    // Structured statements
    // ------------------------------------------------------------------

    fn parse_conditional_statement(
        &mut self,
        pos: u32,
        label: Option<NodeIndex>,
        attributes: Vec<NodeIndex>,
        unique_or_priority: Option<Token>,
    ) -> NodeIndex {
        let if_keyword = self.expect(TokenKind::IfKeyword);
        let open_paren = self.expect(TokenKind::OpenParen);
        let predicate = self.parse_conditional_predicate();
        let close_paren = self.expect(TokenKind::CloseParen);
        let statement = self.parse_statement();
        let else_clause = self.parse_else_clause_opt(|p| p.parse_statement());
        self.finish(
            SyntaxKind::ConditionalStatement,
            pos,
            NodeData::ConditionalStatement(ConditionalStatementData {
                label,
                attributes,
                unique_or_priority,
                if_keyword,
                open_paren,
                predicate,
                close_paren,
                statement,
                else_clause,
            }),
        )
    }

    pub(crate) fn parse_conditional_predicate(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let expression =
            self.parse_sub_expression(ExpressionOptions::ALLOW_PATTERN_MATCH, 0);
        // pattern-matching and && chains get folded into a predicate node
        // by the expression parser; a plain expression is wrapped here
        if self.arena.kind(expression) == SyntaxKind::ConditionalPredicate {
            return expression;
        }
        let mut conditions = SeparatedList::new();
        let cond = self.finish(
            SyntaxKind::ConditionalPattern,
            pos,
            NodeData::CondPattern(crate::node::ConditionalPatternData {
                expression,
                matches_keyword: None,
                pattern: None,
            }),
        );
        conditions.items.push(cond);
        self.finish(
            SyntaxKind::ConditionalPredicate,
            pos,
            NodeData::CondPredicate(crate::node::ConditionalPredicateData { conditions }),
        )
    }

    pub(crate) fn parse_else_clause_opt<F>(&mut self, mut item: F) -> Option<NodeIndex>
    where
        F: FnMut(&mut Self) -> NodeIndex,
    {
        let else_keyword = self.consume_if(TokenKind::ElseKeyword)?;
        let pos = else_keyword.full_start;
        let item = item(self);
        Some(self.finish(
            SyntaxKind::ElseClause,
            pos,
            NodeData::ElseClause(ElseClauseData { else_keyword, item }),
        ))
    }

    fn parse_case_statement(
        &mut self,
        pos: u32,
        label: Option<NodeIndex>,
        attributes: Vec<NodeIndex>,
        unique_or_priority: Option<Token>,
        randcase: bool,
    ) -> NodeIndex {
        let case_keyword = self.tokens.consume();
        let (open_paren, expression, close_paren) = if randcase {
            (None, None, None)
        } else {
            let open = self.expect(TokenKind::OpenParen);
            let expr = self.parse_expression();
            let close = self.expect(TokenKind::CloseParen);
            (Some(open), Some(expr), Some(close))
        };

        let mut items = Vec::new();
        while !self.tokens.at_end() && self.tokens.current_kind() != TokenKind::EndCaseKeyword {
            let before = self.tokens.position();
            if let Some(item) = self.parse_case_item(|p| p.parse_statement()) {
                items.push(item);
            }
            if self.tokens.position() == before {
                self.error_at_current(diagnostic_codes::EXPECTED_CASE_ITEM, &[]);
                self.tokens.consume();
            }
        }
        let end_keyword = self.expect(TokenKind::EndCaseKeyword);
        let kind = if randcase {
            SyntaxKind::RandCaseStatement
        } else {
            SyntaxKind::CaseStatement
        };
        self.finish(
            kind,
            pos,
            NodeData::CaseStatement(CaseStatementData {
                label,
                attributes,
                unique_or_priority,
                case_keyword,
                open_paren,
                expression,
                close_paren,
                items,
                end_keyword,
            }),
        )
    }

    /// One case item; the body callback lets case statements and case
    /// generate constructs share the grammar.
    pub(crate) fn parse_case_item<F>(&mut self, mut body: F) -> Option<NodeIndex>
    where
        F: FnMut(&mut Self) -> NodeIndex,
    {
        let pos = self.node_pos();
        if let Some(default_keyword) = self.consume_if(TokenKind::DefaultKeyword) {
            let colon = self.consume_if(TokenKind::Colon);
            let item = body(self);
            return Some(self.finish(
                SyntaxKind::DefaultCaseItem,
                pos,
                NodeData::CaseItem(CaseItemData {
                    expressions: SeparatedList::new(),
                    default_keyword: Some(default_keyword),
                    colon,
                    item,
                }),
            ));
        }
        if !is_possible_expression(self.tokens.current_kind()) {
            return None;
        }
        let expressions = self.parse_comma_list(|p| p.parse_expression());
        let colon = self.expect(TokenKind::Colon);
        let item = body(self);
        Some(self.finish(
            SyntaxKind::StandardCaseItem,
            pos,
            NodeData::CaseItem(CaseItemData {
                expressions,
                default_keyword: None,
                colon: Some(colon),
                item,
            }),
        ))
    }

    fn parse_for_loop(
        &mut self,
        pos: u32,
        label: Option<NodeIndex>,
        attributes: Vec<NodeIndex>,
    ) -> NodeIndex {
        let for_keyword = self.expect(TokenKind::ForKeyword);
        let open_paren = self.expect(TokenKind::OpenParen);
        let initializers = if self.tokens.current_kind() == TokenKind::Semicolon {
            SeparatedList::new()
        } else {
            self.parse_comma_list(|p| p.parse_for_initializer())
        };
        let semi1 = self.expect(TokenKind::Semicolon);
        let condition = if self.tokens.current_kind() == TokenKind::Semicolon {
            None
        } else {
            Some(self.parse_expression())
        };
        let semi2 = self.expect(TokenKind::Semicolon);
        let steps = if self.tokens.current_kind() == TokenKind::CloseParen {
            SeparatedList::new()
        } else {
            self.parse_comma_list(|p| p.parse_expression())
        };
        let close_paren = self.expect(TokenKind::CloseParen);
        let statement = self.parse_statement();
        self.finish(
            SyntaxKind::ForLoopStatement,
            pos,
            NodeData::ForLoop(ForLoopData {
                label,
                attributes,
                for_keyword,
                open_paren,
                initializers,
                semi1,
                condition,
                semi2,
                steps,
                close_paren,
                statement,
            }),
        )
    }

    fn parse_for_initializer(&mut self) -> NodeIndex {
        let is_decl = is_data_type_start(self.tokens.current_kind())
            || matches!(self.tokens.current_kind(), TokenKind::VarKeyword)
            || (self.tokens.current_kind() == TokenKind::Identifier
                && self.is_variable_declaration());
        if !is_decl {
            return self.parse_expression();
        }
        let pos = self.node_pos();
        // `var` before the type is allowed, per data declarations
        let _ = self.consume_if(TokenKind::VarKeyword);
        let type_node = self.parse_data_type(false);
        let declarator = self.parse_declarator();
        self.finish(
            SyntaxKind::ForVariableDeclaration,
            pos,
            NodeData::ForVariableDecl(ForVariableDeclData { type_node, declarator }),
        )
    }

    fn parse_foreach_loop(
        &mut self,
        pos: u32,
        label: Option<NodeIndex>,
        attributes: Vec<NodeIndex>,
    ) -> NodeIndex {
        let keyword = self.expect(TokenKind::ForeachKeyword);
        let open_paren = self.expect(TokenKind::OpenParen);
        let array_name = self.parse_foreach_name();
        let open_bracket = self.expect(TokenKind::OpenBracket);
        let loop_variables = if self.tokens.current_kind() == TokenKind::CloseBracket {
            SeparatedList::new()
        } else {
            self.parse_comma_list(|p| p.parse_foreach_variable())
        };
        let close_bracket = self.expect(TokenKind::CloseBracket);
        let close_paren = self.expect(TokenKind::CloseParen);
        let statement = self.parse_statement();
        self.finish(
            SyntaxKind::ForeachLoopStatement,
            pos,
            NodeData::ForeachLoop(ForeachLoopData {
                label,
                attributes,
                keyword,
                open_paren,
                array_name,
                open_bracket,
                loop_variables,
                close_bracket,
                close_paren,
                statement,
            }),
        )
    }

    /// Dotted or scoped name without selects; the trailing `[...]`
    /// belongs to the foreach construct itself.
    fn parse_foreach_name(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let mut left = self.parse_name();
        while self.tokens.current_kind() == TokenKind::Dot {
            let separator = self.tokens.consume();
            let right = self.parse_name();
            left = self.finish(
                SyntaxKind::MemberAccessExpression,
                pos,
                NodeData::ScopedName(crate::node::ScopedNameData { left, separator, right }),
            );
        }
        left
    }

    /// Loop variable slots may be empty: `foreach (m[, j])`.
    fn parse_foreach_variable(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let token = if self.tokens.current_kind() == TokenKind::Identifier {
            self.tokens.consume()
        } else {
            Token::missing(TokenKind::Identifier, self.tokens.prev_token_end())
        };
        self.finish(SyntaxKind::IdentifierName, pos, NodeData::Token(TokenData { token }))
    }

    fn parse_do_while(
        &mut self,
        pos: u32,
        label: Option<NodeIndex>,
        attributes: Vec<NodeIndex>,
    ) -> NodeIndex {
        let do_keyword = self.expect(TokenKind::DoKeyword);
        let statement = self.parse_statement();
        let while_keyword = self.expect(TokenKind::WhileKeyword);
        let open_paren = self.expect(TokenKind::OpenParen);
        let expression = self.parse_expression();
        let close_paren = self.expect(TokenKind::CloseParen);
        let semicolon = self.expect(TokenKind::Semicolon);
        self.finish(
            SyntaxKind::DoWhileStatement,
            pos,
            NodeData::DoWhile(DoWhileData {
                label,
                attributes,
                do_keyword,
                statement,
                while_keyword,
                open_paren,
                expression,
                close_paren,
                semicolon,
            }),
        )
    }

    fn parse_assertion_statement(
        &mut self,
        pos: u32,
        label: Option<NodeIndex>,
        attributes: Vec<NodeIndex>,
    ) -> NodeIndex {
        let keyword = self.tokens.consume();
        let kind = match keyword.kind {
            TokenKind::AssertKeyword => SyntaxKind::ImmediateAssertStatement,
            TokenKind::AssumeKeyword => SyntaxKind::ImmediateAssumeStatement,
            _ => SyntaxKind::ImmediateCoverStatement,
        };
        let open_paren = self.expect(TokenKind::OpenParen);
        let expression = self.parse_expression();
        let close_paren = self.expect(TokenKind::CloseParen);
        let action = self.parse_action_block();
        self.finish(
            kind,
            pos,
            NodeData::Assertion(AssertionStatementData {
                label,
                attributes,
                keyword,
                open_paren,
                expression,
                close_paren,
                action,
            }),
        )
    }

    /// `statement [else statement]` or a bare `else statement`.
    fn parse_action_block(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let statement = if self.tokens.current_kind() == TokenKind::ElseKeyword {
            None
        } else {
            Some(self.parse_statement())
        };
        let else_clause = self.parse_else_clause_opt(|p| p.parse_statement());
        self.finish(
            SyntaxKind::ActionBlock,
            pos,
            NodeData::ActionBlock(ActionBlockData { statement, else_clause }),
        )
    }

    fn parse_wait_statement(
        &mut self,
        pos: u32,
        label: Option<NodeIndex>,
        attributes: Vec<NodeIndex>,
    ) -> NodeIndex {
        let keyword = self.expect(TokenKind::WaitKeyword);
        if let Some(fork_keyword) = self.consume_if(TokenKind::ForkKeyword) {
            let semicolon = self.expect(TokenKind::Semicolon);
            return self.finish(
                SyntaxKind::WaitForkStatement,
                pos,
                NodeData::WaitFork(WaitForkData {
                    label,
                    attributes,
                    wait_keyword: keyword,
                    fork_keyword,
                    semicolon,
                }),
            );
        }
        let open_paren = self.expect(TokenKind::OpenParen);
        let expression = self.parse_expression();
        let close_paren = self.expect(TokenKind::CloseParen);
        let statement = self.parse_statement();
        self.finish(
            SyntaxKind::WaitStatement,
            pos,
            NodeData::Wait(WaitStatementData {
                label,
                attributes,
                keyword,
                open_paren,
                expression,
                close_paren,
                statement,
            }),
        )
    }

    fn parse_wait_order(
        &mut self,
        pos: u32,
        label: Option<NodeIndex>,
        attributes: Vec<NodeIndex>,
    ) -> NodeIndex {
        let keyword = self.expect(TokenKind::WaitOrderKeyword);
        let open_paren = self.expect(TokenKind::OpenParen);
        let names = self.parse_comma_list(|p| p.parse_name());
        let close_paren = self.expect(TokenKind::CloseParen);
        let action = self.parse_action_block();
        self.finish(
            SyntaxKind::WaitOrderStatement,
            pos,
            NodeData::WaitOrder(WaitOrderData {
                label,
                attributes,
                keyword,
                open_paren,
                names,
                close_paren,
                action,
            }),
        )
    }

    /// `begin ... end` or `fork ... join|join_any|join_none`.
    fn parse_block(
        &mut self,
        pos: u32,
        label: Option<NodeIndex>,
        attributes: Vec<NodeIndex>,
        parallel: bool,
    ) -> NodeIndex {
        let begin_keyword = self.tokens.consume();
        let block_name = self.parse_named_block_clause_opt();
        let stop: &[TokenKind] = if parallel {
            &[
                TokenKind::JoinKeyword,
                TokenKind::JoinAnyKeyword,
                TokenKind::JoinNoneKeyword,
            ]
        } else {
            &[TokenKind::EndKeyword]
        };
        let items = self.parse_block_items(stop);
        let end_keyword = if stop.contains(&self.tokens.current_kind()) {
            self.tokens.consume()
        } else {
            self.expect(stop[0])
        };
        let end_name = self.parse_named_block_clause_opt();
        let kind = if parallel {
            SyntaxKind::ParallelBlockStatement
        } else {
            SyntaxKind::SequentialBlockStatement
        };
        self.finish(
            kind,
            pos,
            NodeData::Block(BlockStatementData {
                label,
                attributes,
                begin_keyword,
                block_name,
                items,
                end_keyword,
                end_name,
            }),
        )
    }

    /// Declarations-then-statements item list for blocks and subroutine
    /// bodies. Declarations may actually appear interleaved; the grammar
    /// here accepts both orders.
    pub(crate) fn parse_block_items(&mut self, stop: &[TokenKind]) -> Vec<NodeIndex> {
        let mut items = Vec::new();
        while !self.tokens.at_end() && !stop.contains(&self.tokens.current_kind()) {
            let before = self.tokens.position();
            if self.is_block_declaration_start() {
                items.push(self.parse_block_declaration());
            } else {
                items.push(self.parse_statement());
            }
            if self.tokens.position() == before {
                self.error_at_current(diagnostic_codes::EXPECTED_STATEMENT, &[]);
                self.tokens.consume();
            }
        }
        items
    }

    fn is_block_declaration_start(&mut self) -> bool {
        use TokenKind::*;
        match self.tokens.current_kind() {
            TypedefKeyword | ImportKeyword | ParameterKeyword | LocalParamKeyword | ConstKeyword
            | VarKeyword | StaticKeyword | AutomaticKeyword => true,
            Identifier => self.is_variable_declaration(),
            kind => is_data_type_start(kind),
        }
    }

    pub(crate) fn parse_block_declaration(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let attributes = Vec::new();
        match self.tokens.current_kind() {
            TokenKind::TypedefKeyword => self.parse_typedef(attributes, pos),
            TokenKind::ImportKeyword => self.parse_package_import(attributes, pos),
            TokenKind::ParameterKeyword | TokenKind::LocalParamKeyword => {
                self.parse_parameter_declaration(attributes, pos, true)
            }
            _ => self.parse_data_declaration(attributes, pos),
        }
    }

    // ------------------------------------------------------------------
    // Timing controls and event expressions
    // ------------------------------------------------------------------

    pub(crate) fn parse_timing_control(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        match self.tokens.current_kind() {
            TokenKind::Hash => {
                let hash = self.tokens.consume();
                let delay = self.parse_delay_value();
                self.finish(
                    SyntaxKind::DelayControl,
                    pos,
                    NodeData::DelayControl(DelayControlData { hash, delay }),
                )
            }
            _ => {
                let at = self.expect(TokenKind::At);
                match self.tokens.current_kind() {
                    TokenKind::Star => {
                        let star = self.tokens.consume();
                        self.finish(
                            SyntaxKind::ImplicitEventControl,
                            pos,
                            NodeData::ImplicitEvent(ImplicitEventData { at, tokens: vec![star] }),
                        )
                    }
                    // `(*)` lexes as `(*` `)`
                    TokenKind::OpenParenStar => {
                        let open = self.tokens.consume();
                        let close = self.expect(TokenKind::CloseParen);
                        self.finish(
                            SyntaxKind::ImplicitEventControl,
                            pos,
                            NodeData::ImplicitEvent(ImplicitEventData {
                                at,
                                tokens: vec![open, close],
                            }),
                        )
                    }
                    TokenKind::OpenParen => {
                        let epos = self.node_pos();
                        let open_paren = self.tokens.consume();
                        let inner = self.parse_event_expression();
                        let close_paren = self.expect(TokenKind::CloseParen);
                        let event = self.finish(
                            SyntaxKind::ParenthesizedEventExpression,
                            epos,
                            NodeData::Parenthesized(ParenthesizedData {
                                open_paren,
                                expression: inner,
                                close_paren,
                            }),
                        );
                        self.finish(
                            SyntaxKind::EventControl,
                            pos,
                            NodeData::EventControl(EventControlData { at, event }),
                        )
                    }
                    _ => {
                        let epos = self.node_pos();
                        let name = self.parse_name();
                        let event = self.finish(
                            SyntaxKind::SignalEventExpression,
                            epos,
                            NodeData::SignalEvent(SignalEventData {
                                edge: None,
                                expression: name,
                                iff_clause: None,
                            }),
                        );
                        self.finish(
                            SyntaxKind::EventControl,
                            pos,
                            NodeData::EventControl(EventControlData { at, event }),
                        )
                    }
                }
            }
        }
    }

    /// The delay after `#`: a literal, a name, or a parenthesized
    /// (possibly min:typ:max) expression.
    fn parse_delay_value(&mut self) -> NodeIndex {
        self.parse_sub_expression(ExpressionOptions::empty(), 14)
    }

    /// `term (or|, term)*` with left association.
    pub(crate) fn parse_event_expression(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let mut left = self.parse_event_expression_term();
        while matches!(
            self.tokens.current_kind(),
            TokenKind::OrKeyword | TokenKind::Comma
        ) {
            let or_token = self.tokens.consume();
            let right = self.parse_event_expression_term();
            left = self.finish(
                SyntaxKind::BinaryEventExpression,
                pos,
                NodeData::BinaryEvent(BinaryEventData { left, or_token, right }),
            );
        }
        left
    }

    fn parse_event_expression_term(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        if self.tokens.current_kind() == TokenKind::OpenParen {
            let open_paren = self.tokens.consume();
            let inner = self.parse_event_expression();
            let close_paren = self.expect(TokenKind::CloseParen);
            return self.finish(
                SyntaxKind::ParenthesizedEventExpression,
                pos,
                NodeData::Parenthesized(ParenthesizedData {
                    open_paren,
                    expression: inner,
                    close_paren,
                }),
            );
        }
        let edge = match self.tokens.current_kind() {
            TokenKind::PosEdgeKeyword | TokenKind::NegEdgeKeyword | TokenKind::EdgeKeyword => {
                Some(self.tokens.consume())
            }
            _ => None,
        };
        let expression = self.parse_expression();
        let iff_clause = match self.consume_if(TokenKind::IffKeyword) {
            Some(iff_keyword) => {
                let ipos = iff_keyword.full_start;
                let condition = self.parse_expression();
                Some(self.finish(
                    SyntaxKind::IffClause,
                    ipos,
                    NodeData::IffClause(IffClauseData { iff_keyword, expression: condition }),
                ))
            }
            None => None,
        };
        self.finish(
            SyntaxKind::SignalEventExpression,
            pos,
            NodeData::SignalEvent(SignalEventData { edge, expression, iff_clause }),
        )
    }
}
