//! Component C6: whole-file rule engine. Each submodule groups rules that
//! share a cross-line scan (labels, reachability, SETLOCAL balance, loop
//! bodies, ...); `all()` assembles the full roster.

mod call_resolution;
mod continuations;
mod delayed_expansion_bugs;
mod duplication;
mod error_handling;
mod labels;
mod loops;
mod parens;
mod reachability;
mod redundant_scans;
mod setlocal;
mod style_consistency;
mod variables;

use crate::rules::FileRule;

pub fn all() -> Vec<Box<dyn FileRule>> {
    vec![
        Box::new(parens::UnbalancedParens),
        Box::new(labels::UndefinedLabelTarget),
        Box::new(labels::UnreferencedLabel),
        Box::new(labels::DuplicateLabelDefinition),
        Box::new(labels::LabelCasingMismatch),
        Box::new(reachability::UnreachableCode),
        Box::new(reachability::FallThroughWithoutExit),
        Box::new(variables::UndefinedVariable),
        Box::new(variables::UnusedVariable),
        Box::new(variables::ShadowsWellKnownVariable),
        Box::new(variables::InconsistentVariableCasing),
        Box::new(setlocal::SetlocalWithNoSet),
        Box::new(setlocal::UnusedDelayedExpansion),
        Box::new(setlocal::UnmatchedEndlocal),
        Box::new(setlocal::SetlocalLeftOpen),
        Box::new(setlocal::DelayedExpansionForWholeScript),
        Box::new(setlocal::UnnecessarySetlocal),
        Box::new(setlocal::BackToBackSetlocal),
        Box::new(setlocal::ExcessiveSetlocalNesting),
        Box::new(setlocal::SetlocalImmediatelyClosed),
        Box::new(setlocal::RedundantNestedDelayedExpansion),
        Box::new(setlocal::MissingEnableExtensions),
        Box::new(setlocal::SetlocalKeywordCasing),
        Box::new(delayed_expansion_bugs::StaleVariableInIfBlock),
        Box::new(delayed_expansion_bugs::ChainedSetThenStaleRead),
        Box::new(loops::PotentialInfiniteLoop),
        Box::new(loops::GotoUsedForIteration),
        Box::new(loops::ExternalProcessInLoop),
        Box::new(loops::RedundantCallInLoop),
        Box::new(loops::ConstantRecomputedInLoop),
        Box::new(loops::EchoInLoop),
        Box::new(loops::NestedLoopsOverSameSet),
        Box::new(loops::FindstrInLoop),
        Box::new(loops::NetworkCallInLoop),
        Box::new(continuations::DanglingContinuation),
        Box::new(continuations::ContinuationFollowedByBlank),
        Box::new(continuations::ExcessiveContinuationChain),
        Box::new(call_resolution::ExitBAtTopLevel),
        Box::new(call_resolution::UnresolvedCallTarget),
        Box::new(call_resolution::UnguardedRecursiveCall),
        Box::new(call_resolution::BareExitInsideCalledSubroutine),
        Box::new(style_consistency::MissingEchoOff),
        Box::new(style_consistency::InconsistentLineEnding),
        Box::new(style_consistency::UnconventionalExtensionCasing),
        Box::new(style_consistency::InconsistentIndentation),
        Box::new(style_consistency::LabelNotPrecededByBlankLine),
        Box::new(style_consistency::MixedCommentStyle),
        Box::new(style_consistency::MissingSectionSeparator),
        Box::new(style_consistency::InconsistentHelpBannerUsage),
        Box::new(style_consistency::InconsistentQuotingStyle),
        Box::new(style_consistency::InconsistentOperatorSpacing),
        Box::new(style_consistency::InconsistentExitBUsage),
        Box::new(style_consistency::MissingHeaderComment),
        Box::new(style_consistency::ExcessiveBlankLines),
        Box::new(style_consistency::MissingTrailingNewline),
        Box::new(style_consistency::MixedLineEndings),
        Box::new(style_consistency::InconsistentPathQuoting),
        Box::new(duplication::DuplicatedBlock),
        Box::new(redundant_scans::RepeatedFindstrScan),
        Box::new(redundant_scans::RedundantDirectoryEnumeration),
        Box::new(redundant_scans::RedundantEchoOff),
        Box::new(error_handling::MissingErrorCheck),
        Box::new(error_handling::ChangeDirWithoutPushd),
        Box::new(error_handling::IfBlockWithoutElse),
    ]
}
