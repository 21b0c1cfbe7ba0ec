//! Paginated list screens: search box, filters, "see more".
//!
//! One generic controller serves every accumulated list; a marker type per
//! list wires it to its action and its accumulator.

use std::future::Future;
use std::marker::PhantomData;

use crate::actions::Dispatcher;
use crate::error::Result;
use crate::store::{Accumulator, AppStore, ArtistClassListKind, ContestListKind, ListQuery, WorkListKind};
use museume_types::{ArtistClass, ArtistClassQuery, Contest, ContestQuery, Page, RecordId, Work, WorkQuery};

/// A list the browser can page through.
pub trait PagedList {
    type Item: Clone;
    type Query: ListQuery + Default;

    fn fetch(dispatcher: &Dispatcher, query: Self::Query) -> impl Future<Output = Result<Page<Self::Item>>>;

    fn accumulator(store: &AppStore) -> &Accumulator<Self::Item, Self::Query>;

    fn is_loading(store: &AppStore) -> bool;
}

macro_rules! work_list {
    ($name:ident, $kind:expr, $action:ident) => {
        pub struct $name;

        impl PagedList for $name {
            type Item = Work;
            type Query = WorkQuery;

            fn fetch(dispatcher: &Dispatcher, query: WorkQuery) -> impl Future<Output = Result<Page<Work>>> {
                dispatcher.$action(query)
            }

            fn accumulator(store: &AppStore) -> &Accumulator<Work, WorkQuery> {
                store.work.list($kind)
            }

            fn is_loading(store: &AppStore) -> bool {
                store.work.is_loading()
            }
        }
    };
}

work_list!(MyWorks, WorkListKind::Mine, get_my_works);
work_list!(PublicWorks, WorkListKind::Public, get_public_works);
work_list!(MyCollection, WorkListKind::Collection, get_my_collection);
work_list!(FamilyGallery, WorkListKind::FamilyGallery, get_family_gallery);

macro_rules! contest_list {
    ($name:ident, $item:ty, $query:ty, $action:ident, $list:ident, $kind:expr) => {
        pub struct $name;

        impl PagedList for $name {
            type Item = $item;
            type Query = $query;

            fn fetch(dispatcher: &Dispatcher, query: $query) -> impl Future<Output = Result<Page<$item>>> {
                dispatcher.$action(query)
            }

            fn accumulator(store: &AppStore) -> &Accumulator<$item, $query> {
                store.contest.$list($kind)
            }

            fn is_loading(store: &AppStore) -> bool {
                store.contest.is_loading()
            }
        }
    };
}

contest_list!(Contests, Contest, ContestQuery, get_contests, contests, ContestListKind::All);
contest_list!(MyContests, Contest, ContestQuery, get_my_contests, contests, ContestListKind::Mine);
contest_list!(
    ArtistClasses,
    ArtistClass,
    ArtistClassQuery,
    get_artist_classes,
    artist_classes,
    ArtistClassListKind::All
);
contest_list!(
    MyArtistClasses,
    ArtistClass,
    ArtistClassQuery,
    get_my_artist_classes,
    artist_classes,
    ArtistClassListKind::Mine
);

pub struct ListBrowser<L: PagedList> {
    dispatcher: Dispatcher,
    query: L::Query,
    _list: PhantomData<L>,
}

impl<L: PagedList> ListBrowser<L> {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            query: L::Query::default(),
            _list: PhantomData,
        }
    }

    pub fn query(&self) -> &L::Query {
        &self.query
    }

    /// Fetch page 1 of the current query.
    pub async fn refresh(&mut self) -> Result<()> {
        self.query.set_page(1);
        L::fetch(&self.dispatcher, self.query.clone()).await.map(|_| ())
    }

    pub async fn set_search(&mut self, search: impl Into<String>) -> Result<()> {
        self.query.set_search(search.into());
        self.refresh().await
    }

    /// Emptying the search box runs a fresh unfiltered search.
    pub async fn clear_search(&mut self) -> Result<()> {
        self.set_search(String::new()).await
    }

    /// Change any filter; the list restarts from page 1.
    pub async fn update_filters(&mut self, change: impl FnOnce(&mut L::Query)) -> Result<()> {
        change(&mut self.query);
        self.refresh().await
    }

    /// Load the next page. Returns `false` without fetching while a load is
    /// in progress or when the list is exhausted.
    pub async fn see_more(&mut self) -> Result<bool> {
        let (loading, has_next) = self
            .dispatcher
            .store()
            .read(|s| (L::is_loading(s), L::accumulator(s).has_next()));
        if loading || !has_next {
            return Ok(false);
        }

        let current = self.query.page_number();
        self.query.set_page(current + 1);
        match L::fetch(&self.dispatcher, self.query.clone()).await {
            Ok(_) => Ok(true),
            Err(err) => {
                self.query.set_page(current);
                Err(err)
            }
        }
    }

    pub fn items(&self) -> Vec<L::Item> {
        self.dispatcher
            .store()
            .read(|s| L::accumulator(s).results().to_vec())
    }

    pub fn has_more(&self) -> bool {
        self.dispatcher
            .store()
            .read(|s| L::accumulator(s).has_next())
    }

    pub fn is_loading(&self) -> bool {
        self.dispatcher.store().read(L::is_loading)
    }
}

impl<L: PagedList<Item = Work, Query = WorkQuery>> ListBrowser<L> {
    /// Toggle a like, then quietly refetch from page 1 so counts come from
    /// the server.
    pub async fn toggle_like(&mut self, work_id: RecordId, liked: bool) -> Result<()> {
        if liked {
            self.dispatcher.unlike_work(work_id).await?;
        } else {
            self.dispatcher.like_work(work_id).await?;
        }
        self.query.set_page(1);
        L::fetch(&self.dispatcher, self.query.clone().liked_refresh()).await?;
        Ok(())
    }
}
