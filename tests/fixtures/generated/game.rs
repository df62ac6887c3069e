// Generated by mdlc. Do not edit.
#![allow(dead_code, unused_imports, non_camel_case_types, clippy::new_without_default)]

use super::*;

pub mod game {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum Mode {
        #[default]
        Easy,
        Hard,
    }

    pub mod player {
        use super::*;

        pub struct Stats {
            base: ::mdl_runtime::ModelBase<Stats>,
            hp: i32,
        }

        impl Stats {
            pub fn new() -> Self {
                let base = ::mdl_runtime::ModelBase::new();
                Self {
                    base,
                    hp: Default::default(),
                }
            }

            pub fn hp(&self) -> i32 {
                self.hp
            }

            pub fn set_hp(&mut self, value: i32) {
                if self.hp != value {
                    self.hp = value;
                    self.base.self_changed();
                    self.base.notify_parent();
                }
            }
        }

        impl Default for Stats {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ::mdl_runtime::Model for Stats {
            fn base(&self) -> &::mdl_runtime::ModelBase<Self> {
                &self.base
            }

            fn base_mut(&mut self) -> &mut ::mdl_runtime::ModelBase<Self> {
                &mut self.base
            }
        }
    }

    pub struct Player {
        base: ::mdl_runtime::ModelBase<Player>,
        name: String,
        stats: player::Stats,
    }

    impl Player {
        pub fn new() -> Self {
            let base = ::mdl_runtime::ModelBase::new();
            let stats = player::Stats::new();
            ::mdl_runtime::Model::base(&stats).attach_to(&base);
            Self {
                base,
                name: Default::default(),
                stats,
            }
        }

        pub fn name(&self) -> &str {
            &self.name
        }

        pub fn set_name(&mut self, value: String) {
            if self.name != value {
                self.name = value;
                self.base.self_changed();
                self.base.notify_parent();
            }
        }

        pub fn stats(&self) -> &player::Stats {
            &self.stats
        }

        /// Replace the value through `set_stats`, which carries its observers over.
        pub fn stats_mut(&mut self) -> &mut player::Stats {
            ::mdl_runtime::Model::base(&self.stats).attach_to(&self.base);
            &mut self.stats
        }

        pub fn set_stats(&mut self, value: player::Stats) -> player::Stats {
            let previous = ::mdl_runtime::transplant(&mut self.stats, value);
            self.base.self_changed();
            self.base.notify_parent();
            previous
        }
    }

    impl Default for Player {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ::mdl_runtime::Model for Player {
        fn base(&self) -> &::mdl_runtime::ModelBase<Self> {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ::mdl_runtime::ModelBase<Self> {
            &mut self.base
        }

        fn force_mark_dirty(&mut self) {
            self.base.mark_dirty();
            ::mdl_runtime::Model::force_mark_dirty(&mut self.stats);
        }

        fn invoke_callbacks_on_children(
            &mut self,
            force: bool,
            on_error: &mut dyn FnMut(::mdl_runtime::ObserverFailure),
        ) {
            ::mdl_runtime::Model::invoke_model_updated_callbacks(&mut self.stats, force, on_error);
        }
    }

    pub struct Item {
        base: ::mdl_runtime::ModelBase<Item>,
        count: i32,
    }

    impl Item {
        pub fn new() -> Self {
            let base = ::mdl_runtime::ModelBase::new();
            Self {
                base,
                count: Default::default(),
            }
        }

        pub fn count(&self) -> i32 {
            self.count
        }

        pub fn set_count(&mut self, value: i32) {
            if self.count != value {
                self.count = value;
                self.base.self_changed();
                self.base.notify_parent();
            }
        }
    }

    impl Default for Item {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ::mdl_runtime::Model for Item {
        fn base(&self) -> &::mdl_runtime::ModelBase<Self> {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ::mdl_runtime::ModelBase<Self> {
            &mut self.base
        }
    }
}

pub struct Game {
    base: ::mdl_runtime::ModelBase<Game>,
    score: i32,
    mode: game::Mode,
    team: Team,
    player: game::Player,
    items: ::mdl_runtime::ModelList<game::Item>,
    on_score: ::mdl_runtime::Action<i32>,
    common: Common,
}

impl Game {
    pub fn new() -> Self {
        let base = ::mdl_runtime::ModelBase::new();
        let player = game::Player::new();
        ::mdl_runtime::Model::base(&player).attach_to(&base);
        let items = ::mdl_runtime::ModelList::new();
        ::mdl_runtime::Model::base(&items).attach_to(&base);
        let common = Common::new();
        ::mdl_runtime::Model::base(&common).attach_to(&base);
        Self {
            base,
            score: Default::default(),
            mode: Default::default(),
            team: Default::default(),
            player,
            items,
            on_score: Default::default(),
            common,
        }
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn set_score(&mut self, value: i32) {
        if self.score != value {
            self.score = value;
            self.base.self_changed();
            self.base.notify_parent();
        }
    }

    pub fn mode(&self) -> game::Mode {
        self.mode
    }

    pub fn set_mode(&mut self, value: game::Mode) {
        if self.mode != value {
            self.mode = value;
            self.base.self_changed();
            self.base.notify_parent();
        }
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn set_team(&mut self, value: Team) {
        if self.team != value {
            self.team = value;
            self.base.self_changed();
            self.base.notify_parent();
        }
    }

    pub fn player(&self) -> &game::Player {
        &self.player
    }

    /// Replace the value through `set_player`, which carries its observers over.
    pub fn player_mut(&mut self) -> &mut game::Player {
        ::mdl_runtime::Model::base(&self.player).attach_to(&self.base);
        &mut self.player
    }

    pub fn set_player(&mut self, value: game::Player) -> game::Player {
        let previous = ::mdl_runtime::transplant(&mut self.player, value);
        self.base.self_changed();
        self.base.notify_parent();
        previous
    }

    pub fn items(&self) -> &::mdl_runtime::ModelList<game::Item> {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut ::mdl_runtime::ModelList<game::Item> {
        ::mdl_runtime::Model::base(&self.items).attach_to(&self.base);
        &mut self.items
    }

    pub fn on_score(&self) -> &::mdl_runtime::Action<i32> {
        &self.on_score
    }

    pub fn set_on_score(&mut self, value: ::mdl_runtime::Action<i32>) {
        if self.on_score != value {
            self.on_score = value;
            self.base.self_changed();
            self.base.notify_parent();
        }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    /// Replace the value through `set_common`, which carries its observers over.
    pub fn common_mut(&mut self) -> &mut Common {
        ::mdl_runtime::Model::base(&self.common).attach_to(&self.base);
        &mut self.common
    }

    pub fn set_common(&mut self, value: Common) -> Common {
        let previous = ::mdl_runtime::transplant(&mut self.common, value);
        self.base.self_changed();
        self.base.notify_parent();
        previous
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl ::mdl_runtime::Model for Game {
    fn base(&self) -> &::mdl_runtime::ModelBase<Self> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ::mdl_runtime::ModelBase<Self> {
        &mut self.base
    }

    fn force_mark_dirty(&mut self) {
        self.base.mark_dirty();
        ::mdl_runtime::Model::force_mark_dirty(&mut self.player);
        ::mdl_runtime::Model::force_mark_dirty(&mut self.items);
        ::mdl_runtime::Model::force_mark_dirty(&mut self.common);
    }

    fn invoke_callbacks_on_children(
        &mut self,
        force: bool,
        on_error: &mut dyn FnMut(::mdl_runtime::ObserverFailure),
    ) {
        ::mdl_runtime::Model::invoke_model_updated_callbacks(&mut self.player, force, on_error);
        ::mdl_runtime::Model::invoke_model_updated_callbacks(&mut self.items, force, on_error);
        ::mdl_runtime::Model::invoke_model_updated_callbacks(&mut self.common, force, on_error);
    }
}

impl ::mdl_runtime::BindTarget for Game {}

pub mod locators {
    use super::*;

    pub struct GameLocator {
        pub player: GamePlayerLocator,
        pub items: ::mdl_runtime::ListModelLocator<super::Game, super::game::Item>,
        pub common: GameCommonLocator,
    }

    impl GameLocator {
        pub fn new() -> Self {
            Self {
                player: GamePlayerLocator::new(),
                items: ::mdl_runtime::ListModelLocator::new(
                    |model: &super::Game| model.items(),
                    |model: &mut super::Game| model.items_mut(),
                ),
                common: GameCommonLocator::new(),
            }
        }
    }

    impl ::mdl_runtime::Locate<super::Game> for GameLocator {
        type Target = super::Game;

        fn locate<'a>(&self, root: &'a super::Game) -> Option<&'a Self::Target> {
            Some(root)
        }

        fn locate_mut<'a>(&self, root: &'a mut super::Game) -> Option<&'a mut Self::Target> {
            Some(root)
        }
    }

    pub struct GamePlayerLocator {
        locator: ::mdl_runtime::ModelLocator<super::Game, super::game::Player>,
        pub stats: ::mdl_runtime::ModelLocator<super::Game, super::game::player::Stats>,
    }

    impl GamePlayerLocator {
        pub fn new() -> Self {
            Self {
                locator: ::mdl_runtime::ModelLocator::new(
                    |model: &super::Game| model.player(),
                    |model: &mut super::Game| model.player_mut(),
                ),
                stats: ::mdl_runtime::ModelLocator::new(
                    |model: &super::Game| model.player().stats(),
                    |model: &mut super::Game| model.player_mut().stats_mut(),
                ),
            }
        }
    }

    impl ::mdl_runtime::Locate<super::Game> for GamePlayerLocator {
        type Target = super::game::Player;

        fn locate<'a>(&self, root: &'a super::Game) -> Option<&'a Self::Target> {
            ::mdl_runtime::Locate::locate(&self.locator, root)
        }

        fn locate_mut<'a>(&self, root: &'a mut super::Game) -> Option<&'a mut Self::Target> {
            ::mdl_runtime::Locate::locate_mut(&self.locator, root)
        }
    }

    pub struct GameCommonLocator {
        locator: ::mdl_runtime::ModelLocator<super::Game, super::Common>,
        pub inner: ::mdl_runtime::ModelLocator<super::Game, super::common::Inner>,
    }

    impl GameCommonLocator {
        pub fn new() -> Self {
            Self {
                locator: ::mdl_runtime::ModelLocator::new(
                    |model: &super::Game| model.common(),
                    |model: &mut super::Game| model.common_mut(),
                ),
                inner: ::mdl_runtime::ModelLocator::new(
                    |model: &super::Game| model.common().inner(),
                    |model: &mut super::Game| model.common_mut().inner_mut(),
                ),
            }
        }
    }

    impl ::mdl_runtime::Locate<super::Game> for GameCommonLocator {
        type Target = super::Common;

        fn locate<'a>(&self, root: &'a super::Game) -> Option<&'a Self::Target> {
            ::mdl_runtime::Locate::locate(&self.locator, root)
        }

        fn locate_mut<'a>(&self, root: &'a mut super::Game) -> Option<&'a mut Self::Target> {
            ::mdl_runtime::Locate::locate_mut(&self.locator, root)
        }
    }

    pub static GAME: ::std::sync::LazyLock<GameLocator> = ::std::sync::LazyLock::new(GameLocator::new);
}
